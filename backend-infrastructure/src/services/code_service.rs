// Credential generation
// Scannable codes carry 128 bits of entropy; they are the only thing checked
// at the gate. Claim codes are shorter because they are typed by hand and
// die after one use or the TTL.

use base64::Engine;
use rand::RngCore;

use backend_domain::ports::CodeGenerator;

const SCANNABLE_PREFIX: &str = "PA-";
const SCANNABLE_BYTES: usize = 16;
const CLAIM_BYTES: usize = 6;

pub struct RandomCodeGenerator;

impl RandomCodeGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn scannable_code(&self) -> String {
        let mut bytes = [0u8; SCANNABLE_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        format!(
            "{}{}",
            SCANNABLE_PREFIX,
            base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
        )
    }

    fn claim_code(&self) -> String {
        let mut bytes = [0u8; CLAIM_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        let mut out = String::with_capacity(CLAIM_BYTES * 2);
        for byte in bytes {
            out.push_str(&format!("{byte:02X}"));
        }
        out
    }
}
