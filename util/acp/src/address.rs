//! Full format addresses.
//!
//! An address is the bech32m encoding of `0x00 | code_hash | hash_type | args`
//! under the network prefix.

use std::fmt;
use std::str::FromStr;

use bech32::{FromBase32, ToBase32, Variant};
use ckb_types::{bytes::Bytes, core::ScriptHashType, packed, prelude::*};

use crate::error::Error;

const PREFIX_MAINNET: &str = "ckb";
const PREFIX_TESTNET: &str = "ckt";
const FULL_FORMAT: u8 = 0x00;
// format byte, code hash and hash type
const MIN_PAYLOAD_LEN: usize = 1 + 32 + 1;

#[derive(Hash, Eq, PartialEq, Debug, Clone, Copy)]
pub enum NetworkType {
    Mainnet,
    Testnet,
}

impl NetworkType {
    pub fn from_prefix(value: &str) -> Option<NetworkType> {
        match value {
            PREFIX_MAINNET => Some(NetworkType::Mainnet),
            PREFIX_TESTNET => Some(NetworkType::Testnet),
            _ => None,
        }
    }

    pub fn to_prefix(self) -> &'static str {
        match self {
            NetworkType::Mainnet => PREFIX_MAINNET,
            NetworkType::Testnet => PREFIX_TESTNET,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Address {
    network: NetworkType,
    script: packed::Script,
}

impl Address {
    pub fn new(network: NetworkType, script: packed::Script) -> Self {
        Address { network, script }
    }

    pub fn network(&self) -> NetworkType {
        self.network
    }

    pub fn script(&self) -> &packed::Script {
        &self.script
    }

    pub fn payload(&self) -> Vec<u8> {
        let args = self.script.args().raw_data();
        let mut payload = Vec::with_capacity(MIN_PAYLOAD_LEN + args.len());
        payload.push(FULL_FORMAT);
        payload.extend_from_slice(self.script.code_hash().as_slice());
        payload.extend_from_slice(self.script.hash_type().as_slice());
        payload.extend_from_slice(&args);
        payload
    }
}

impl From<&Address> for packed::Script {
    fn from(address: &Address) -> packed::Script {
        address.script.clone()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let encoded = bech32::encode(
            self.network.to_prefix(),
            self.payload().to_base32(),
            Variant::Bech32m,
        )
        .map_err(|_| fmt::Error)?;
        write!(f, "{encoded}")
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (hrp, data, variant) = bech32::decode(input)?;
        let network = NetworkType::from_prefix(&hrp)
            .ok_or_else(|| Error::Address(format!("unknown network prefix {hrp}")))?;
        if variant != Variant::Bech32m {
            return Err(Error::Address(
                "full format address must be encoded with bech32m".to_owned(),
            ));
        }
        let payload = Vec::<u8>::from_base32(&data)?;
        if payload.len() < MIN_PAYLOAD_LEN {
            return Err(Error::Address(format!(
                "payload too short: {} bytes",
                payload.len()
            )));
        }
        if payload[0] != FULL_FORMAT {
            return Err(Error::Address(format!(
                "unsupported address format {:#04x}",
                payload[0]
            )));
        }
        let mut code_hash = [0u8; 32];
        code_hash.copy_from_slice(&payload[1..33]);
        let hash_type = ScriptHashType::try_from(payload[33])
            .map_err(|_| Error::Address(format!("invalid hash type {}", payload[33])))?;
        let script = packed::Script::new_builder()
            .code_hash(packed::Byte32::new(code_hash))
            .hash_type(hash_type.into())
            .args(Bytes::from(payload[34..].to_vec()).pack())
            .build();
        Ok(Address::new(network, script))
    }
}
