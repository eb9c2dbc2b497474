// src/application/commands/account_commands.rs
//
// Account Command Handlers - Pro entitlement

use crate::application::{
    dto::EntitlementDto,
    error_handling::ErrorResponse,
    state::AppState,
};
use crate::domain::SettingsUpdate;

/// Effective Pro status: the identity provider flag or the settings flag.
pub async fn effective_pro(state: &AppState) -> Result<bool, ErrorResponse> {
    if state.settings_service.get().await.is_pro {
        return Ok(true);
    }
    Ok(state.entitlement.is_pro().await?)
}

/// Current Pro status
pub async fn get_entitlement(state: &AppState) -> Result<EntitlementDto, ErrorResponse> {
    Ok(EntitlementDto {
        is_pro: effective_pro(state).await?,
    })
}

/// Record the Pro upgrade.
///
/// Payment happens outside this app; this only records the resulting flag.
pub async fn upgrade_to_pro(state: &AppState) -> Result<EntitlementDto, ErrorResponse> {
    state.entitlement.grant_pro().await?;
    Ok(EntitlementDto { is_pro: true })
}

/// Drop Pro, e.g. on sign-out or a lapsed subscription.
///
/// Clears both sources of the effective status.
pub async fn downgrade_from_pro(state: &AppState) -> Result<EntitlementDto, ErrorResponse> {
    state.entitlement.revoke_pro().await?;
    if state.settings_service.get().await.is_pro {
        state
            .settings_service
            .update(SettingsUpdate {
                is_pro: Some(false),
                ..Default::default()
            })
            .await?;
    }
    Ok(EntitlementDto { is_pro: false })
}
