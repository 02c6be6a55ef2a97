//! Where the anyone-can-pay script lives on chain and how to recognise it.

use std::path::Path;

use ckb_jsonrpc_types::{DepType, ScriptHashType};
use ckb_types::{bytes::Bytes, core, h256, packed, prelude::*, H256};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The scripts table, e.g.
///
/// ```toml
/// [anyone_can_pay]
/// code_hash = "0x3419a1c09eb2567f6552ee7a8ecffd64155cffe0f1796e6e61ec088d740c1356"
/// hash_type = "type"
/// tx_hash = "0xec26b0f85ed839ece5f11c4c4e837ec359f5adc4420410f6453b1f6b60fb96a6"
/// index = 0
/// dep_type = "dep_group"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptsConfig {
    #[serde(default)]
    pub anyone_can_pay: Option<AcpConfig>,
}

impl ScriptsConfig {
    pub fn new(anyone_can_pay: AcpConfig) -> Self {
        ScriptsConfig {
            anyone_can_pay: Some(anyone_can_pay),
        }
    }

    pub fn load_from_slice(slice: &[u8]) -> Result<Self> {
        toml::from_slice(slice).map_err(Into::into)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read(path)
            .map_err(|err| Error::Config(format!("failed to read {}: {err}", path.display())))?;
        Self::load_from_slice(&content)
    }

    /// Returns the anyone-can-pay script, failing when the table has none.
    pub fn anyone_can_pay(&self) -> Result<&AcpConfig> {
        self.anyone_can_pay
            .as_ref()
            .ok_or(Error::ScriptNotConfigured)
    }
}

/// The anyone-can-pay script identity and its code location.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcpConfig {
    pub code_hash: H256,
    pub hash_type: ScriptHashType,
    pub tx_hash: H256,
    pub index: u32,
    pub dep_type: DepType,
}

impl AcpConfig {
    /// The deployment on Lina, the mainnet.
    pub fn lina() -> Self {
        AcpConfig {
            code_hash: h256!("0xd369597ff47f29fbc0d47d2e3775370d1250b85140c670e4718af712983a2354"),
            hash_type: ScriptHashType::Type,
            tx_hash: h256!("0x4153a2014952d7cac45f285ce9a7c5c0c0e1b21f2d378b82ac1433cb11c25c4d"),
            index: 0,
            dep_type: DepType::DepGroup,
        }
    }

    /// The deployment on Aggron, the testnet.
    pub fn aggron() -> Self {
        AcpConfig {
            code_hash: h256!("0x3419a1c09eb2567f6552ee7a8ecffd64155cffe0f1796e6e61ec088d740c1356"),
            hash_type: ScriptHashType::Type,
            tx_hash: h256!("0xec26b0f85ed839ece5f11c4c4e837ec359f5adc4420410f6453b1f6b60fb96a6"),
            index: 0,
            dep_type: DepType::DepGroup,
        }
    }

    fn packed_hash_type(&self) -> packed::Byte {
        core::ScriptHashType::from(self.hash_type.clone()).into()
    }

    /// Returns true if `script` runs the anyone-can-pay code, whatever its args.
    pub fn is_acp_script(&self, script: &packed::Script) -> bool {
        script.code_hash() == self.code_hash.pack()
            && script.hash_type().as_slice() == self.packed_hash_type().as_slice()
    }

    /// Builds an anyone-can-pay lock with the given args.
    pub fn script(&self, args: Bytes) -> packed::Script {
        packed::Script::new_builder()
            .code_hash(self.code_hash.pack())
            .hash_type(self.packed_hash_type())
            .args(args.pack())
            .build()
    }

    pub fn cell_dep(&self) -> packed::CellDep {
        packed::CellDep::new_builder()
            .out_point(packed::OutPoint::new(self.tx_hash.pack(), self.index))
            .dep_type(core::DepType::from(self.dep_type.clone()).into())
            .build()
    }
}
