use std::io::Write;

use ckb_jsonrpc_types::ScriptHashType;
use ckb_types::{bytes::Bytes, core, packed, prelude::*};

use super::{acp_lock, scripts_config, secp_lock};
use crate::config::{AcpConfig, ScriptsConfig};
use crate::error::Error;

const CONFIG: &str = r#"
[anyone_can_pay]
code_hash = "0x3419a1c09eb2567f6552ee7a8ecffd64155cffe0f1796e6e61ec088d740c1356"
hash_type = "type"
tx_hash = "0xec26b0f85ed839ece5f11c4c4e837ec359f5adc4420410f6453b1f6b60fb96a6"
index = 0
dep_type = "dep_group"
"#;

#[test]
fn load_from_slice() {
    let config = ScriptsConfig::load_from_slice(CONFIG.as_bytes()).expect("load config");
    assert_eq!(config, scripts_config());
    assert_eq!(config.anyone_can_pay().unwrap(), &AcpConfig::aggron());
}

#[test]
fn load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CONFIG.as_bytes()).unwrap();
    let config = ScriptsConfig::load_from_file(file.path()).expect("load config");
    assert_eq!(config, scripts_config());
}

#[test]
fn missing_script() {
    let config = ScriptsConfig::load_from_slice(b"").expect("load empty config");
    assert_eq!(config.anyone_can_pay(), Err(Error::ScriptNotConfigured));
}

#[test]
fn invalid_config() {
    let result = ScriptsConfig::load_from_slice(b"[anyone_can_pay]\nindex = \"zero\"");
    assert!(matches!(result, Err(Error::Config(_))));

    let result = ScriptsConfig::load_from_file("/nonexistent/scripts.toml");
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn recognize_acp_script() {
    let config = scripts_config();
    let acp = config.anyone_can_pay().unwrap();
    assert!(acp.is_acp_script(&acp_lock(1, &[])));
    assert!(acp.is_acp_script(&acp_lock(2, &[0x01, 0x02])));
    assert!(!acp.is_acp_script(&secp_lock(1)));

    let data_hash_type = acp_lock(1, &[])
        .as_builder()
        .hash_type(core::ScriptHashType::Data1.into())
        .build();
    assert!(!acp.is_acp_script(&data_hash_type));
}

#[test]
fn build_script_and_cell_dep() {
    let acp = AcpConfig::lina();
    assert_eq!(acp.hash_type, ScriptHashType::Type);

    let script = acp.script(Bytes::from(vec![0u8; 20]));
    assert_eq!(script.code_hash(), acp.code_hash.pack());
    assert_eq!(script.args().raw_data(), Bytes::from(vec![0u8; 20]));

    let cell_dep = acp.cell_dep();
    assert_eq!(
        cell_dep.out_point(),
        packed::OutPoint::new(acp.tx_hash.pack(), 0)
    );
    assert_eq!(
        core::DepType::try_from(cell_dep.dep_type()).unwrap(),
        core::DepType::DepGroup
    );
}
