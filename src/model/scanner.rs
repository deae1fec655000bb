//! Scanner attributes.

use super::EntityRef;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Scanner implementation, from the protocol's numeric type code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScannerType {
    Osp,
    OpenVas,
    Cve,
    Gmp,
    GreenboneSensor,
    Unknown(i64),
}

impl ScannerType {
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Osp,
            2 => Self::OpenVas,
            3 => Self::Cve,
            4 => Self::Gmp,
            5 => Self::GreenboneSensor,
            other => Self::Unknown(other),
        }
    }

    /// Get display label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Osp => "OSP Scanner",
            Self::OpenVas => "OpenVAS Scanner",
            Self::Cve => "CVE Scanner",
            Self::Gmp => "GMP Scanner",
            Self::GreenboneSensor => "Greenbone Sensor",
            Self::Unknown(_) => "Unknown",
        }
    }
}

/// Summary of an X.509 certificate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateInfo {
    /// `valid`, `expired`, `inactive` as reported by the server
    pub time_status: Option<String>,
    pub activation_time: Option<DateTime<Utc>>,
    pub expiration_time: Option<DateTime<Utc>>,
    pub issuer: Option<String>,
    pub md5_fingerprint: Option<String>,
}

/// Scanner attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannerDetails {
    pub scanner_type: Option<ScannerType>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub credential: Option<EntityRef>,
    /// PEM encoded CA certificate
    pub ca_pub: Option<String>,
    pub ca_pub_info: Option<CertificateInfo>,
    pub tasks: Vec<EntityRef>,
    pub configs: Vec<EntityRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scanner_type_codes() {
        assert_eq!(ScannerType::from_code(2), ScannerType::OpenVas);
        assert_eq!(ScannerType::from_code(5).label(), "Greenbone Sensor");
        assert_eq!(ScannerType::from_code(42), ScannerType::Unknown(42));
    }
}
