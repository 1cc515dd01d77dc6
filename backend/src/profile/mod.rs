//! Target profile - fixed boot parameters of one device
//!
//! A profile bundles the inputs that never change between probes of the
//! same target: the five firmware constants ("nazo"), the 6-byte hardware
//! identifier (MAC), the version word, the boot frame count and the
//! timer0 value.
//!
//! Profiles are loaded from JSON and validated eagerly. Lengths are never
//! silently truncated or padded.
//!
//! # Example
//! ```
//! use initseed_core::profile::TargetProfile;
//!
//! let json = r#"{
//!     "name": "sample",
//!     "nazo": [35741456, 35741708, 35741708, 35741784, 35741784],
//!     "mac": [0, 33, 71, 71, 38, 244],
//!     "version": 96,
//!     "frame": 6,
//!     "timer0": 3194
//! }"#;
//!
//! let profile = TargetProfile::from_json(json).unwrap();
//! let params = profile.params().unwrap();
//! assert_eq!(params.mac()[5], 0xF4);
//! ```

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Number of firmware constant words
pub const NAZO_WORDS: usize = 5;

/// Number of hardware identifier bytes
pub const MAC_BYTES: usize = 6;

/// Errors raised while building target parameters
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("{field} must have exactly {expected} elements, got {actual}")]
    InvalidLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid profile JSON: {0}")]
    Json(String),
}

/// Validated boot parameters of a target
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetParams {
    nazo: [u32; NAZO_WORDS],
    mac: [u8; MAC_BYTES],
    version: u32,
    frame: u32,
    timer0: u32,
}

impl TargetParams {
    /// Validate and copy construction parameters
    ///
    /// # Errors
    /// [`InputError::InvalidLength`] if `nazo` does not hold exactly five
    /// words or `mac` exactly six bytes.
    pub fn new(
        nazo: &[u32],
        mac: &[u8],
        version: u32,
        frame: u32,
        timer0: u32,
    ) -> Result<Self, InputError> {
        let nazo: [u32; NAZO_WORDS] = nazo.try_into().map_err(|_| InputError::InvalidLength {
            field: "nazo",
            expected: NAZO_WORDS,
            actual: nazo.len(),
        })?;
        let mac: [u8; MAC_BYTES] = mac.try_into().map_err(|_| InputError::InvalidLength {
            field: "mac",
            expected: MAC_BYTES,
            actual: mac.len(),
        })?;

        Ok(Self {
            nazo,
            mac,
            version,
            frame,
            timer0,
        })
    }

    pub fn nazo(&self) -> &[u32; NAZO_WORDS] {
        &self.nazo
    }

    pub fn mac(&self) -> &[u8; MAC_BYTES] {
        &self.mac
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn timer0(&self) -> u32 {
        self.timer0
    }
}

/// Serializable target description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetProfile {
    /// Human readable label, not part of the fingerprint
    #[serde(default)]
    pub name: String,

    pub nazo: Vec<u32>,

    pub mac: Vec<u8>,

    pub version: u32,

    pub frame: u32,

    pub timer0: u32,
}

impl TargetProfile {
    pub fn from_json(json: &str) -> Result<Self, InputError> {
        serde_json::from_str(json).map_err(|e| InputError::Json(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, InputError> {
        serde_json::to_string_pretty(self).map_err(|e| InputError::Json(e.to_string()))
    }

    /// Validate into [`TargetParams`]
    pub fn params(&self) -> Result<TargetParams, InputError> {
        TargetParams::new(&self.nazo, &self.mac, self.version, self.frame, self.timer0)
    }

    /// SHA-256 over the boot parameters, hex encoded
    ///
    /// Two profiles with the same parameters share a fingerprint regardless
    /// of their names, so search reports can be matched back to a target.
    pub fn fingerprint(&self) -> Result<String, InputError> {
        let canonical = serde_json::json!({
            "frame": self.frame,
            "mac": self.mac,
            "nazo": self.nazo,
            "timer0": self.timer0,
            "version": self.version,
        });
        let json = serde_json::to_string(&canonical).map_err(|e| InputError::Json(e.to_string()))?;

        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        Ok(format!("{:x}", hasher.finalize()))
    }
}

impl From<&TargetParams> for TargetProfile {
    fn from(params: &TargetParams) -> Self {
        TargetProfile {
            name: String::new(),
            nazo: params.nazo.to_vec(),
            mac: params.mac.to_vec(),
            version: params.version,
            frame: params.frame,
            timer0: params.timer0,
        }
    }
}
