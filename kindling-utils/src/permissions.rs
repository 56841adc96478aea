use std::collections::HashSet;
use std::fmt;
use std::future::Future;
use std::str::FromStr;

use poise::serenity_prelude as serenity;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use kindling_database::Database;
use kindling_database::impls::settings::get_setting_raw;

/// Discord user that always resolves to [`PermissionLevel::Owner`],
/// whatever the role configuration says.
pub const OWNER_ID: u64 = 251_344_185_783_746_560;

pub const ADMIN_ROLE_KEY: &str = "admin_role";
pub const MOD_ROLE_KEY: &str = "mod_role";
pub const SUPP_ROLE_KEY: &str = "supp_role";

/// Ordered privilege tier. A higher tier satisfies every lower requirement.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermissionLevel {
    Public,
    Supporter,
    Moderator,
    Administrator,
    Owner,
}

impl PermissionLevel {
    pub const ALL: [Self; 5] = [
        Self::Public,
        Self::Supporter,
        Self::Moderator,
        Self::Administrator,
        Self::Owner,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Public => "PUBLIC",
            Self::Supporter => "SUPPORTER",
            Self::Moderator => "MODERATOR",
            Self::Administrator => "ADMINISTRATOR",
            Self::Owner => "OWNER",
        }
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown permission level `{0}`")]
pub struct UnknownPermissionLevel(pub String);

impl FromStr for PermissionLevel {
    type Err = UnknownPermissionLevel;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "supporter" | "supp" => Ok(Self::Supporter),
            "moderator" | "mod" => Ok(Self::Moderator),
            "administrator" | "admin" => Ok(Self::Administrator),
            "owner" => Ok(Self::Owner),
            _ => Err(UnknownPermissionLevel(raw.trim().to_owned())),
        }
    }
}

/// Named capability with a default minimum level.
///
/// The effective level can be overridden per deployment through the
/// `permissions.<name>` setting, which is re-read on every check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Permission {
    ChangePrefix,
    Admininfo,
    ViewOwnPermissions,
    ViewAllPermissions,
    ConfigureRoles,
    ConfigureChangelog,
    ViewUserlog,
}

impl Permission {
    pub const ALL: [Self; 7] = [
        Self::ChangePrefix,
        Self::Admininfo,
        Self::ViewOwnPermissions,
        Self::ViewAllPermissions,
        Self::ConfigureRoles,
        Self::ConfigureChangelog,
        Self::ViewUserlog,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::ChangePrefix => "change_prefix",
            Self::Admininfo => "admininfo",
            Self::ViewOwnPermissions => "view_own_permissions",
            Self::ViewAllPermissions => "view_all_permissions",
            Self::ConfigureRoles => "configure_roles",
            Self::ConfigureChangelog => "configure_changelog",
            Self::ViewUserlog => "view_userlog",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::ChangePrefix => "change the bot prefix",
            Self::Admininfo => "view the bot configuration",
            Self::ViewOwnPermissions => "view own permission level",
            Self::ViewAllPermissions => "view all permission levels",
            Self::ConfigureRoles => "change the admin, mod and supporter roles",
            Self::ConfigureChangelog => "change the changelog channel",
            Self::ViewUserlog => "view logged messages of a user",
        }
    }

    pub fn default_level(self) -> PermissionLevel {
        PermissionLevel::Administrator
    }

    pub fn settings_key(self) -> String {
        format!("permissions.{}", self.name())
    }

    pub fn from_name(raw: &str) -> Option<Self> {
        let wanted = raw.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|permission| permission.name() == wanted)
    }
}

/// Identity a permission check is evaluated for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    pub id: u64,
    /// Role IDs held in the guild. `None` outside a guild.
    pub roles: Option<HashSet<u64>>,
    /// Native guild `ADMINISTRATOR` permission.
    pub administrator: bool,
}

impl Actor {
    /// An actor outside any guild, e.g. in DMs.
    pub fn direct(id: u64) -> Self {
        Self {
            id,
            roles: None,
            administrator: false,
        }
    }

    pub fn member(id: u64, roles: impl IntoIterator<Item = u64>, administrator: bool) -> Self {
        Self {
            id,
            roles: Some(roles.into_iter().collect()),
            administrator,
        }
    }
}

/// Read-only view of the settings store.
pub trait SettingsStore: Sync {
    /// Value stored under `key`, or `None` when it is unset.
    fn get<T>(&self, key: &str) -> impl Future<Output = anyhow::Result<Option<T>>> + Send
    where
        T: DeserializeOwned + Send;
}

impl SettingsStore for Database {
    async fn get<T>(&self, key: &str) -> anyhow::Result<Option<T>>
    where
        T: DeserializeOwned + Send,
    {
        let Some(raw) = get_setting_raw(self, key).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(error) => {
                warn!(?error, setting = key, "ignoring undecodable setting");
                Ok(None)
            }
        }
    }
}

/// Resolve the permission tier of `actor`. First match wins.
pub async fn resolve_permission_level<S>(
    actor: &Actor,
    store: &S,
) -> anyhow::Result<PermissionLevel>
where
    S: SettingsStore,
{
    // Hardcoded override, evaluated before any role configuration.
    if actor.id == OWNER_ID {
        return Ok(PermissionLevel::Owner);
    }

    let Some(roles) = &actor.roles else {
        return Ok(PermissionLevel::Public);
    };

    let admin_role = store.get::<u64>(ADMIN_ROLE_KEY).await?;
    let mod_role = store.get::<u64>(MOD_ROLE_KEY).await?;
    let supp_role = store.get::<u64>(SUPP_ROLE_KEY).await?;

    let holds = |role: Option<u64>| role.is_some_and(|role_id| roles.contains(&role_id));

    if actor.administrator || holds(admin_role) {
        return Ok(PermissionLevel::Administrator);
    }
    if holds(mod_role) {
        return Ok(PermissionLevel::Moderator);
    }
    if holds(supp_role) {
        return Ok(PermissionLevel::Supporter);
    }

    Ok(PermissionLevel::Public)
}

#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// Uniform denial; never says which role was missing.
    #[error("insufficient permission")]
    PermissionDenied,
    #[error(transparent)]
    Settings(#[from] anyhow::Error),
}

/// Allow iff the resolved tier of `actor` is at least `required`.
pub async fn guard<S>(
    required: PermissionLevel,
    actor: &Actor,
    store: &S,
) -> Result<PermissionLevel, GateError>
where
    S: SettingsStore,
{
    let level = resolve_permission_level(actor, store).await?;
    if level >= required {
        Ok(level)
    } else {
        Err(GateError::PermissionDenied)
    }
}

/// Current threshold of `permission`, honouring any stored override.
pub async fn effective_level<S>(permission: Permission, store: &S) -> anyhow::Result<PermissionLevel>
where
    S: SettingsStore,
{
    Ok(store
        .get::<PermissionLevel>(&permission.settings_key())
        .await?
        .unwrap_or_else(|| permission.default_level()))
}

pub async fn check_permission<S>(
    permission: Permission,
    actor: &Actor,
    store: &S,
) -> Result<PermissionLevel, GateError>
where
    S: SettingsStore,
{
    let required = effective_level(permission, store).await?;
    guard(required, actor, store).await
}

/// Build an [`Actor`] from the live member state. Nothing is cached.
///
/// [`OWNER_ID`] never needs member state and is returned without any request.
pub async fn fetch_actor(
    http: &serenity::Http,
    guild_id: Option<serenity::GuildId>,
    user_id: serenity::UserId,
) -> anyhow::Result<Actor> {
    let Some(guild_id) = guild_id.filter(|_| user_id.get() != OWNER_ID) else {
        return Ok(Actor::direct(user_id.get()));
    };

    let guild = guild_id.to_partial_guild(http).await?;
    let member = guild_id.member(http, user_id).await?;

    let administrator = guild.owner_id == user_id
        || member_permissions(&guild, &member.roles).contains(serenity::Permissions::ADMINISTRATOR);

    Ok(Actor::member(
        user_id.get(),
        member.roles.iter().map(|role_id| role_id.get()),
        administrator,
    ))
}

/// Union of the guild-wide permissions granted by `@everyone` and `roles`.
fn member_permissions(
    guild: &serenity::PartialGuild,
    roles: &[serenity::RoleId],
) -> serenity::Permissions {
    let everyone_role_id = serenity::RoleId::new(guild.id.get());

    guild
        .roles
        .values()
        .filter(|role| role.id == everyone_role_id || roles.contains(&role.id))
        .fold(serenity::Permissions::empty(), |resolved, role| {
            resolved | role.permissions
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use poise::serenity_prelude as serenity;
    use serde::de::DeserializeOwned;
    use serde_json::{Value, json};

    use super::{
        ADMIN_ROLE_KEY, Actor, GateError, MOD_ROLE_KEY, OWNER_ID, Permission, PermissionLevel,
        SUPP_ROLE_KEY, SettingsStore, check_permission, effective_level, fetch_actor, guard,
        resolve_permission_level,
    };

    const ADMIN_ROLE: u64 = 1_000;
    const MOD_ROLE: u64 = 2_000;
    const SUPP_ROLE: u64 = 3_000;
    const OTHER_ROLE: u64 = 9_999;
    const USER: u64 = 42;
    const NO_ROLES: [u64; 0] = [];

    #[derive(Default)]
    struct MemorySettings(HashMap<String, Value>);

    impl MemorySettings {
        fn with_roles() -> Self {
            Self::default()
                .with(ADMIN_ROLE_KEY, json!(ADMIN_ROLE))
                .with(MOD_ROLE_KEY, json!(MOD_ROLE))
                .with(SUPP_ROLE_KEY, json!(SUPP_ROLE))
        }

        fn with(mut self, key: &str, value: Value) -> Self {
            self.0.insert(key.to_owned(), value);
            self
        }
    }

    impl SettingsStore for MemorySettings {
        async fn get<T>(&self, key: &str) -> anyhow::Result<Option<T>>
        where
            T: DeserializeOwned + Send,
        {
            Ok(self
                .0
                .get(key)
                .cloned()
                .map(serde_json::from_value)
                .transpose()?)
        }
    }

    fn sample_actors() -> Vec<Actor> {
        vec![
            Actor::direct(OWNER_ID),
            Actor::member(OWNER_ID, NO_ROLES, false),
            Actor::direct(USER),
            Actor::member(USER, NO_ROLES, false),
            Actor::member(USER, [OTHER_ROLE], false),
            Actor::member(USER, [SUPP_ROLE], false),
            Actor::member(USER, [MOD_ROLE], false),
            Actor::member(USER, [MOD_ROLE, SUPP_ROLE], false),
            Actor::member(USER, [ADMIN_ROLE], false),
            Actor::member(USER, NO_ROLES, true),
        ]
    }

    #[test]
    fn levels_are_totally_ordered_with_owner_on_top() {
        let mut sorted = PermissionLevel::ALL;
        sorted.sort();
        assert_eq!(sorted, PermissionLevel::ALL);
        assert!(PermissionLevel::ALL.iter().all(|level| *level <= PermissionLevel::Owner));
        assert!(PermissionLevel::Public < PermissionLevel::Supporter);
        assert!(PermissionLevel::Moderator < PermissionLevel::Administrator);
    }

    #[test]
    fn levels_parse_from_names_and_short_forms() {
        assert_eq!("admin".parse::<PermissionLevel>().ok(), Some(PermissionLevel::Administrator));
        assert_eq!("MOD".parse::<PermissionLevel>().ok(), Some(PermissionLevel::Moderator));
        assert_eq!(" supporter ".parse::<PermissionLevel>().ok(), Some(PermissionLevel::Supporter));
        assert_eq!("Owner".parse::<PermissionLevel>().ok(), Some(PermissionLevel::Owner));
        assert!("root".parse::<PermissionLevel>().is_err());
        for level in PermissionLevel::ALL {
            assert_eq!(level.name().parse::<PermissionLevel>().ok(), Some(level));
        }
    }

    #[test]
    fn levels_serialize_as_upper_case_names() {
        assert_eq!(
            serde_json::to_value(PermissionLevel::Moderator).ok(),
            Some(json!("MODERATOR"))
        );
        assert_eq!(
            serde_json::from_value::<PermissionLevel>(json!("OWNER")).ok(),
            Some(PermissionLevel::Owner)
        );
    }

    #[test]
    fn permissions_round_trip_through_their_names() {
        for permission in Permission::ALL {
            assert_eq!(Permission::from_name(permission.name()), Some(permission));
            assert_eq!(permission.default_level(), PermissionLevel::Administrator);
        }
        assert_eq!(Permission::from_name("CHANGE_PREFIX"), Some(Permission::ChangePrefix));
        assert_eq!(Permission::from_name("nope"), None);
        assert_eq!(Permission::ChangePrefix.settings_key(), "permissions.change_prefix");
    }

    #[tokio::test]
    async fn owner_id_is_owner_without_any_configuration() {
        let empty = MemorySettings::default();
        assert_eq!(
            resolve_permission_level(&Actor::direct(OWNER_ID), &empty).await.ok(),
            Some(PermissionLevel::Owner)
        );
        assert_eq!(
            resolve_permission_level(&Actor::member(OWNER_ID, NO_ROLES, false), &empty).await.ok(),
            Some(PermissionLevel::Owner)
        );
    }

    #[tokio::test]
    async fn owner_id_is_owner_regardless_of_roles() {
        let settings = MemorySettings::with_roles();
        for actor in [
            Actor::member(OWNER_ID, [SUPP_ROLE], false),
            Actor::member(OWNER_ID, [ADMIN_ROLE], true),
            Actor::direct(OWNER_ID),
        ] {
            assert_eq!(
                resolve_permission_level(&actor, &settings).await.ok(),
                Some(PermissionLevel::Owner)
            );
        }
    }

    #[tokio::test]
    async fn actors_without_roles_are_public() {
        let settings = MemorySettings::with_roles();
        assert_eq!(
            resolve_permission_level(&Actor::direct(USER), &settings).await.ok(),
            Some(PermissionLevel::Public)
        );
    }

    #[tokio::test]
    async fn admin_role_without_native_flag_is_administrator() {
        let settings = MemorySettings::with_roles();
        let actor = Actor::member(USER, [ADMIN_ROLE], false);
        assert_eq!(
            resolve_permission_level(&actor, &settings).await.ok(),
            Some(PermissionLevel::Administrator)
        );
    }

    #[tokio::test]
    async fn native_administrator_needs_no_configured_role() {
        let empty = MemorySettings::default();
        let actor = Actor::member(USER, NO_ROLES, true);
        assert_eq!(
            resolve_permission_level(&actor, &empty).await.ok(),
            Some(PermissionLevel::Administrator)
        );
    }

    #[tokio::test]
    async fn highest_matching_role_wins() {
        let settings = MemorySettings::with_roles();
        let cases = [
            (vec![SUPP_ROLE], PermissionLevel::Supporter),
            (vec![MOD_ROLE], PermissionLevel::Moderator),
            (vec![SUPP_ROLE, MOD_ROLE], PermissionLevel::Moderator),
            (vec![SUPP_ROLE, ADMIN_ROLE], PermissionLevel::Administrator),
            (vec![OTHER_ROLE], PermissionLevel::Public),
        ];

        for (roles, expected) in cases {
            let actor = Actor::member(USER, roles, false);
            assert_eq!(resolve_permission_level(&actor, &settings).await.ok(), Some(expected));
        }
    }

    #[tokio::test]
    async fn missing_role_configuration_never_matches() {
        let only_mod = MemorySettings::default().with(MOD_ROLE_KEY, json!(MOD_ROLE));
        let actor = Actor::member(USER, [ADMIN_ROLE, SUPP_ROLE], false);
        assert_eq!(
            resolve_permission_level(&actor, &only_mod).await.ok(),
            Some(PermissionLevel::Public)
        );
    }

    #[tokio::test]
    async fn moderator_is_denied_administrator_commands() {
        let settings = MemorySettings::with_roles();
        let actor = Actor::member(USER, [MOD_ROLE], false);

        assert_eq!(
            resolve_permission_level(&actor, &settings).await.ok(),
            Some(PermissionLevel::Moderator)
        );
        assert!(matches!(
            guard(PermissionLevel::Administrator, &actor, &settings).await,
            Err(GateError::PermissionDenied)
        ));
    }

    #[tokio::test]
    async fn direct_message_actor_cannot_reach_supporter_commands() {
        let settings = MemorySettings::with_roles();
        let actor = Actor::direct(USER);
        assert!(matches!(
            guard(PermissionLevel::Supporter, &actor, &settings).await,
            Err(GateError::PermissionDenied)
        ));
    }

    #[tokio::test]
    async fn guard_allows_exactly_when_resolved_level_is_high_enough() {
        let settings = MemorySettings::with_roles();

        for actor in sample_actors() {
            let Ok(resolved) = resolve_permission_level(&actor, &settings).await else {
                panic!("resolution failed for {actor:?}");
            };

            for required in PermissionLevel::ALL {
                let allowed = guard(required, &actor, &settings).await.is_ok();
                assert_eq!(allowed, resolved >= required, "{actor:?} at {required}");
            }
        }
    }

    #[tokio::test]
    async fn overrides_are_read_on_every_check() {
        let actor = Actor::member(USER, [MOD_ROLE], false);
        let defaults = MemorySettings::with_roles();

        assert_eq!(
            effective_level(Permission::ChangePrefix, &defaults).await.ok(),
            Some(PermissionLevel::Administrator)
        );
        assert!(matches!(
            check_permission(Permission::ChangePrefix, &actor, &defaults).await,
            Err(GateError::PermissionDenied)
        ));

        let lowered = MemorySettings::with_roles()
            .with(&Permission::ChangePrefix.settings_key(), json!("MODERATOR"));
        assert_eq!(
            check_permission(Permission::ChangePrefix, &actor, &lowered).await.ok(),
            Some(PermissionLevel::Moderator)
        );
    }

    #[tokio::test]
    async fn denial_does_not_name_the_missing_role() {
        let settings = MemorySettings::with_roles();
        let actor = Actor::member(USER, [SUPP_ROLE], false);
        let Err(denied) = guard(PermissionLevel::Owner, &actor, &settings).await else {
            panic!("supporter must not pass an owner gate");
        };
        assert_eq!(denied.to_string(), "insufficient permission");
    }

    #[tokio::test]
    async fn owner_is_resolved_in_guilds_without_member_lookup() {
        // An empty token makes every request fail, so success means no request was made.
        let http = serenity::Http::new("");
        let Ok(actor) = fetch_actor(
            &http,
            Some(serenity::GuildId::new(1)),
            serenity::UserId::new(OWNER_ID),
        )
        .await
        else {
            panic!("owner lookup must not touch the API");
        };

        assert_eq!(actor, Actor::direct(OWNER_ID));
        assert_eq!(
            resolve_permission_level(&actor, &MemorySettings::default()).await.ok(),
            Some(PermissionLevel::Owner)
        );
    }
}
