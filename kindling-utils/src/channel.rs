use poise::serenity_prelude as serenity;

use kindling_database::model::log::ChannelType;

/// The channel kind has no entry in the classification table.
///
/// Treated as a bug, never defaulted to one of the known kinds.
#[derive(Debug, thiserror::Error)]
#[error("unrecognized channel kind: {0}")]
pub struct UnrecognizedChannelKind(pub String);

/// Map a Discord channel kind to the logged [`ChannelType`].
pub fn classify_kind(kind: serenity::ChannelType) -> Result<ChannelType, UnrecognizedChannelKind> {
    match kind {
        serenity::ChannelType::Text | serenity::ChannelType::News => Ok(ChannelType::Text),
        serenity::ChannelType::Private => Ok(ChannelType::Dm),
        serenity::ChannelType::GroupDm => Ok(ChannelType::Group),
        serenity::ChannelType::Voice => Ok(ChannelType::Voice),
        unhandled => Err(UnrecognizedChannelKind(format!("{unhandled:?}"))),
    }
}

pub fn classify_channel(
    channel: &serenity::Channel,
) -> Result<ChannelType, UnrecognizedChannelKind> {
    match channel {
        serenity::Channel::Guild(guild_channel) => classify_kind(guild_channel.kind),
        serenity::Channel::Private(private_channel) => classify_kind(private_channel.kind),
        unhandled => Err(UnrecognizedChannelKind(format!("{unhandled:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use poise::serenity_prelude as serenity;

    use kindling_database::model::log::ChannelType;

    use super::classify_kind;

    #[test]
    fn known_kinds_map_to_their_tag() {
        assert_eq!(classify_kind(serenity::ChannelType::Text).ok(), Some(ChannelType::Text));
        assert_eq!(classify_kind(serenity::ChannelType::News).ok(), Some(ChannelType::Text));
        assert_eq!(classify_kind(serenity::ChannelType::Private).ok(), Some(ChannelType::Dm));
        assert_eq!(classify_kind(serenity::ChannelType::GroupDm).ok(), Some(ChannelType::Group));
        assert_eq!(classify_kind(serenity::ChannelType::Voice).ok(), Some(ChannelType::Voice));
    }

    #[test]
    fn unknown_kinds_fail_instead_of_defaulting() {
        for kind in [
            serenity::ChannelType::PublicThread,
            serenity::ChannelType::PrivateThread,
            serenity::ChannelType::Stage,
            serenity::ChannelType::Category,
            serenity::ChannelType::Forum,
        ] {
            let Err(error) = classify_kind(kind) else {
                panic!("{kind:?} must not be classified");
            };
            assert!(error.to_string().starts_with("unrecognized channel kind"));
        }
    }
}
