// crates/puppetbridge-config/src/defaults.rs
// ============================================================================
// Module: Config Defaults
// Description: Canonical default-schema configuration document.
// Purpose: Deterministic migration target and example payload.
// Dependencies: std
// ============================================================================

//! ## Overview
//! The canonical new-schema configuration for Puppetbridge. Migration copies
//! an older document onto this baseline, so every field the bridge reads has
//! a defined default here. Placeholder values (`example.com`, the `generate`
//! sentinel) are replaced during migration or rejected by validation before
//! startup.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::config::ConfigError;
use crate::document::ConfigDocument;

// ============================================================================
// SECTION: Default Payload
// ============================================================================

/// Returns the canonical default `config.yaml` payload.
#[must_use]
pub fn default_config_yaml() -> String {
    String::from(
        r#"# Homeserver details
homeserver:
    # The address that this appservice can use to connect to the homeserver.
    address: https://example.com
    # The domain of the homeserver (for MXIDs, etc).
    domain: example.com
    # Whether or not to verify the SSL certificate of the homeserver.
    verify_ssl: true

# Application service host/registration related details
appservice:
    # The address that the homeserver can use to connect to this appservice.
    address: http://localhost:29319
    # The hostname and port where this appservice should listen.
    hostname: 0.0.0.0
    port: 29319
    # The unique ID of this appservice.
    id: puppetbridge
    # Username of the appservice bot.
    bot_username: bridgebot
    # Display name and avatar for the bot.
    bot_displayname: Bridge bot
    bot_avatar: ""
    # Authentication tokens for AS <-> HS communication.
    as_token: generate
    hs_token: generate
    # Community ID for bridged users. Must be created manually.
    community_id: null
    # Public part of the bridge, for the login flow.
    public:
        enabled: false
        prefix: /public
        external: https://example.com/public
        shared_secret: generate

# Bridge config
bridge:
    # Localpart template of MXIDs for remote users.
    # {userid} is replaced with the remote user ID.
    username_template: "bridge_{userid}"
    # Displayname template for remote users.
    displayname_template: "{displayname} (Bridge)"
    # Which fields to prefer when picking a displayname.
    displayname_preference:
        - name
    # Community template for bridged rooms, or null to disable.
    community_template: null
    # The prefix for commands.
    command_prefix: "!bridge"
    # Number of chats to sync on startup.
    initial_chat_sync: 10
    # Whether or not to invite the user's own puppet to private chats.
    invite_own_puppet_to_pm: false
    # Whether or not to sync with custom puppets.
    sync_with_custom_puppets: true
    # Shared secret for login, or null to disable.
    login_shared_secret: null
    # Whether or not to bridge presence.
    presence: true
    # Whether or not to update avatars on initial sync.
    update_avatar_initial_sync: true
    # End-to-bridge encryption support options.
    encryption:
        allow: false
        default: false
    # Whether or not to send delivery receipts.
    delivery_receipts: false
    # Whether or not to allow inviting bridged users to other rooms.
    allow_invites: false
    # Permissions for using the bridge.
    # Permitted values: user, admin. Permitted keys:
    #    * - All Matrix users
    #    domain - All users on that homeserver
    #    mxid - Specific user
    # For example:
    #    permissions:
    #        yourdomain.example: user
    #        "@admin:yourdomain.example": admin
    permissions: {}
"#,
    )
}

/// Parses the canonical defaults into a [`ConfigDocument`].
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] when the embedded payload fails to parse,
/// which indicates a packaging defect rather than user error.
pub fn default_document() -> Result<ConfigDocument, ConfigError> {
    ConfigDocument::from_yaml_str(&default_config_yaml())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
