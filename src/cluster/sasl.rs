//! SASL client messages for PLAIN and SCRAM-SHA-256/512.
//!
//! Only message construction and verification live here; the broker round trips are driven
//! by the connection in `client`.

use crate::context::profile::SaslMechanism;
use crate::error::ClusterError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha512};

/// Upper bound on the server-chosen PBKDF2 iteration count.
pub const MAX_SCRAM_ITERATIONS: u32 = 1_000_000;

/// `authzid NUL authcid NUL passwd` with an empty authzid.
pub fn plain_payload(username: &str, password: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(username.len() + password.len() + 2);
    out.push(0);
    out.extend_from_slice(username.as_bytes());
    out.push(0);
    out.extend_from_slice(password.as_bytes());
    out
}

/// Escape a SCRAM username (`=` and `,` are reserved).
pub fn escape_username(username: &str) -> String {
    username.replace('=', "=3D").replace(',', "=2C")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScramHash {
    Sha256,
    Sha512,
}

impl ScramHash {
    fn hmac(self, key: &[u8], data: &[u8]) -> Result<Vec<u8>, ClusterError> {
        let invalid = |_| ClusterError::Authentication("invalid HMAC key".to_string());
        Ok(match self {
            ScramHash::Sha256 => {
                let mut mac = Hmac::<Sha256>::new_from_slice(key).map_err(invalid)?;
                mac.update(data);
                mac.finalize().into_bytes().to_vec()
            }
            ScramHash::Sha512 => {
                let mut mac = Hmac::<Sha512>::new_from_slice(key).map_err(invalid)?;
                mac.update(data);
                mac.finalize().into_bytes().to_vec()
            }
        })
    }

    fn hash(self, data: &[u8]) -> Vec<u8> {
        match self {
            ScramHash::Sha256 => Sha256::digest(data).to_vec(),
            ScramHash::Sha512 => Sha512::digest(data).to_vec(),
        }
    }

    fn salted_password(self, password: &str, salt: &[u8], iterations: u32) -> Vec<u8> {
        match self {
            ScramHash::Sha256 => {
                let mut out = vec![0u8; 32];
                pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut out);
                out
            }
            ScramHash::Sha512 => {
                let mut out = vec![0u8; 64];
                pbkdf2::pbkdf2_hmac::<Sha512>(password.as_bytes(), salt, iterations, &mut out);
                out
            }
        }
    }
}

#[derive(Debug)]
enum ScramState {
    Initial,
    ClientFirstSent,
    ClientFinalSent { server_signature: Vec<u8> },
    Done,
}

/// Client side of one SCRAM exchange.
#[derive(Debug)]
pub struct ScramClient {
    hash: ScramHash,
    username: String,
    password: String,
    nonce: String,
    state: ScramState,
}

impl ScramClient {
    /// Fails for mechanisms that are not SCRAM.
    pub fn new(
        mechanism: SaslMechanism,
        username: &str,
        password: &str,
    ) -> Result<Self, ClusterError> {
        Self::with_nonce(
            mechanism,
            username,
            password,
            &uuid::Uuid::new_v4().simple().to_string(),
        )
    }

    pub fn with_nonce(
        mechanism: SaslMechanism,
        username: &str,
        password: &str,
        nonce: &str,
    ) -> Result<Self, ClusterError> {
        let hash = match mechanism {
            SaslMechanism::ScramSha256 => ScramHash::Sha256,
            SaslMechanism::ScramSha512 => ScramHash::Sha512,
            SaslMechanism::Plain => {
                return Err(ClusterError::Authentication(
                    "PLAIN is not a SCRAM mechanism".to_string(),
                ))
            }
        };
        Ok(Self {
            hash,
            username: username.to_string(),
            password: password.to_string(),
            nonce: nonce.to_string(),
            state: ScramState::Initial,
        })
    }

    fn client_first_bare(&self) -> String {
        format!("n={},r={}", escape_username(&self.username), self.nonce)
    }

    pub fn client_first(&mut self) -> String {
        self.state = ScramState::ClientFirstSent;
        format!("n,,{}", self.client_first_bare())
    }

    /// Consume server-first, produce client-final.
    pub fn client_final(&mut self, server_first: &str) -> Result<String, ClusterError> {
        if !matches!(self.state, ScramState::ClientFirstSent) {
            return Err(ClusterError::Authentication(
                "SCRAM exchange out of order".to_string(),
            ));
        }

        let mut nonce = None;
        let mut salt = None;
        let mut iterations = None;
        for attr in server_first.split(',') {
            match attr.split_once('=') {
                Some(("r", v)) => nonce = Some(v),
                Some(("s", v)) => salt = Some(v),
                Some(("i", v)) => iterations = Some(v),
                Some(("e", v)) => {
                    return Err(ClusterError::Authentication(format!(
                        "server rejected SCRAM: {}",
                        v
                    )))
                }
                _ => {}
            }
        }
        let malformed =
            |what: &str| ClusterError::Authentication(format!("server-first missing {}", what));
        let nonce = nonce.ok_or_else(|| malformed("nonce"))?;
        let salt = salt.ok_or_else(|| malformed("salt"))?;
        let iterations = iterations.ok_or_else(|| malformed("iteration count"))?;

        if !nonce.starts_with(&self.nonce) || nonce.len() == self.nonce.len() {
            return Err(ClusterError::Authentication(
                "server nonce does not extend client nonce".to_string(),
            ));
        }
        let salt = STANDARD
            .decode(salt)
            .map_err(|e| ClusterError::Authentication(format!("invalid salt: {}", e)))?;
        let iterations: u32 = iterations
            .parse()
            .ok()
            .filter(|i| *i > 0)
            .ok_or_else(|| ClusterError::Authentication("invalid iteration count".to_string()))?;
        if iterations > MAX_SCRAM_ITERATIONS {
            return Err(ClusterError::Authentication(format!(
                "iteration count {} exceeds limit of {}",
                iterations, MAX_SCRAM_ITERATIONS
            )));
        }

        let salted = self.hash.salted_password(&self.password, &salt, iterations);
        let client_key = self.hash.hmac(&salted, b"Client Key")?;
        let stored_key = self.hash.hash(&client_key);

        let without_proof = format!("c=biws,r={}", nonce);
        let auth_message = format!(
            "{},{},{}",
            self.client_first_bare(),
            server_first,
            without_proof
        );
        let client_signature = self.hash.hmac(&stored_key, auth_message.as_bytes())?;
        let proof: Vec<u8> = client_key
            .iter()
            .zip(client_signature.iter())
            .map(|(k, s)| k ^ s)
            .collect();

        let server_key = self.hash.hmac(&salted, b"Server Key")?;
        let server_signature = self.hash.hmac(&server_key, auth_message.as_bytes())?;
        self.state = ScramState::ClientFinalSent { server_signature };

        Ok(format!("{},p={}", without_proof, STANDARD.encode(proof)))
    }

    /// Check the server signature in server-final.
    pub fn verify_server_final(&mut self, server_final: &str) -> Result<(), ClusterError> {
        let ScramState::ClientFinalSent { server_signature } = &self.state else {
            return Err(ClusterError::Authentication(
                "SCRAM exchange out of order".to_string(),
            ));
        };

        if let Some(err) = server_final.strip_prefix("e=") {
            return Err(ClusterError::Authentication(format!(
                "server rejected SCRAM: {}",
                err
            )));
        }
        let verifier = server_final
            .split(',')
            .find_map(|attr| attr.strip_prefix("v="))
            .ok_or_else(|| ClusterError::Authentication("server-final missing verifier".into()))?;
        let verifier = STANDARD
            .decode(verifier)
            .map_err(|e| ClusterError::Authentication(format!("invalid verifier: {}", e)))?;
        if &verifier != server_signature {
            return Err(ClusterError::Authentication(
                "server signature mismatch".to_string(),
            ));
        }
        self.state = ScramState::Done;
        Ok(())
    }

    pub fn is_done(&self) -> bool {
        matches!(self.state, ScramState::Done)
    }
}
