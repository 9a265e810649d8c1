//! Shared test helpers for renderer tests

use crate::tree::ConfigTree;
use toml::{toml, Value};

/// Tree with the values used by the vault listener templates
pub(super) fn vault_tree() -> ConfigTree {
    let data = toml! {
        [vault]
        address = "127.0.0.1:8200"
        ui = true
        tls_disable = false
        max_lease_ttl = 768
        ratio = 0.25
        tls_cert_file = "/etc/vault/tls/cert.pem"
        tls_key_file = "/etc/vault/tls/key.pem"

        [vault.storage]
        path = "/var/lib/vault"
    };
    ConfigTree::from_toml(&Value::Table(data)).unwrap()
}

pub(super) fn empty_tree() -> ConfigTree {
    ConfigTree::new()
}
