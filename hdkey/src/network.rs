/// Version bytes selecting the serialized prefix of extended keys and WIF
/// strings. Passed around by value so several networks can coexist.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Network {
    pub private_version: [u8; 4],
    pub public_version: [u8; 4],
    pub wif_prefix: u8,
}

/// Which half of a [`Network`] a version prefix belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyKind {
    Private,
    Public,
}

impl Network {
    /// xprv / xpub
    pub const MAINNET: Network =
        Network::new([0x04, 0x88, 0xAD, 0xE4], [0x04, 0x88, 0xB2, 0x1E], 0x80);
    /// tprv / tpub
    pub const TESTNET: Network =
        Network::new([0x04, 0x35, 0x83, 0x94], [0x04, 0x35, 0x87, 0xCF], 0xEF);

    pub const fn new(private_version: [u8; 4], public_version: [u8; 4], wif_prefix: u8) -> Self {
        Network {
            private_version,
            public_version,
            wif_prefix,
        }
    }

    pub fn version(&self, kind: KeyKind) -> [u8; 4] {
        match kind {
            KeyKind::Private => self.private_version,
            KeyKind::Public => self.public_version,
        }
    }

    pub fn kind_of(&self, version: [u8; 4]) -> Option<KeyKind> {
        if version == self.private_version {
            Some(KeyKind::Private)
        } else if version == self.public_version {
            Some(KeyKind::Public)
        } else {
            None
        }
    }
}

impl Default for Network {
    fn default() -> Self {
        Network::MAINNET
    }
}

/// Networks recognised by [`crate::ExtendedKey::parse`].
pub const KNOWN_NETWORKS: &[Network] = &[Network::MAINNET, Network::TESTNET];

/// Finds the network and key kind a version prefix belongs to.
pub(crate) fn lookup_version(
    networks: &[Network],
    version: [u8; 4],
) -> Option<(Network, KeyKind)> {
    networks
        .iter()
        .find_map(|n| n.kind_of(version).map(|kind| (*n, kind)))
}
