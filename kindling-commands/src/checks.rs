//! Command gates used as poise `check`s.
//!
//! A check returning `Ok(false)` makes poise raise `CommandCheckFailed`,
//! which the framework error handler turns into the uniform rejection.

use tracing::debug;

use kindling_core::{Context, Error};
use kindling_utils::embed::permission_denied_embed;
use kindling_utils::permissions::{
    Actor, GateError, Permission, PermissionLevel, check_permission, fetch_actor, guard,
};

/// Live actor for the invoking user.
pub async fn author_actor(ctx: Context<'_>) -> Result<Actor, Error> {
    fetch_actor(ctx.http(), ctx.guild_id(), ctx.author().id).await
}

pub async fn has_permission(ctx: Context<'_>, permission: Permission) -> Result<bool, Error> {
    let actor = author_actor(ctx).await?;
    let outcome = check_permission(permission, &actor, &ctx.data().db).await;
    gate_outcome(ctx, permission.name(), outcome)
}

pub async fn has_level(ctx: Context<'_>, required: PermissionLevel) -> Result<bool, Error> {
    let actor = author_actor(ctx).await?;
    let outcome = guard(required, &actor, &ctx.data().db).await;
    gate_outcome(ctx, required.name(), outcome)
}

fn gate_outcome(
    ctx: Context<'_>,
    gate: &str,
    outcome: Result<PermissionLevel, GateError>,
) -> Result<bool, Error> {
    match outcome {
        Ok(_) => Ok(true),
        Err(GateError::PermissionDenied) => {
            debug!(
                user_id = %ctx.author().id,
                command = %ctx.command().qualified_name,
                gate,
                "permission denied"
            );
            Ok(false)
        }
        Err(GateError::Settings(error)) => Err(error),
    }
}

/// Reply with the uniform rejection. For gates evaluated inside a command body.
pub async fn deny(ctx: Context<'_>) -> Result<(), Error> {
    ctx.send(
        poise::CreateReply::default()
            .ephemeral(true)
            .embed(permission_denied_embed()),
    )
    .await?;
    Ok(())
}

pub async fn is_owner(ctx: Context<'_>) -> Result<bool, Error> {
    has_level(ctx, PermissionLevel::Owner).await
}

pub async fn can_change_prefix(ctx: Context<'_>) -> Result<bool, Error> {
    has_permission(ctx, Permission::ChangePrefix).await
}

pub async fn can_view_admininfo(ctx: Context<'_>) -> Result<bool, Error> {
    has_permission(ctx, Permission::Admininfo).await
}

pub async fn can_view_own_permissions(ctx: Context<'_>) -> Result<bool, Error> {
    has_permission(ctx, Permission::ViewOwnPermissions).await
}

pub async fn can_configure_roles(ctx: Context<'_>) -> Result<bool, Error> {
    has_permission(ctx, Permission::ConfigureRoles).await
}

pub async fn can_configure_changelog(ctx: Context<'_>) -> Result<bool, Error> {
    has_permission(ctx, Permission::ConfigureChangelog).await
}

pub async fn can_view_userlog(ctx: Context<'_>) -> Result<bool, Error> {
    has_permission(ctx, Permission::ViewUserlog).await
}
