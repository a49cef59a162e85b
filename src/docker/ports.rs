// Free-port selection for published container ports.
// Draws from the IANA dynamic range and probes with a loopback bind.

use crate::errors::{Result, SmokeError};
use rand::Rng;
use std::net::TcpListener;

/// Start of the IANA dynamic/private port range.
pub const PORT_RANGE_START: u16 = 49152;
/// End of the IANA dynamic/private port range.
pub const PORT_RANGE_END: u16 = 65535;

/// Maximum random draws before giving up. Collisions are rare in the
/// dynamic range, so hitting this means something is systematically wrong.
const MAX_ATTEMPTS: u32 = 512;

/// Check whether a port is free on the loopback interface right now.
/// No guarantee against races after the check returns.
pub fn is_free(port: u16) -> bool {
    TcpListener::bind(("127.0.0.1", port)).is_ok()
}

/// Pick a random unused port from the dynamic range.
pub fn pick_free_port() -> Result<u16> {
    let mut rng = rand::thread_rng();

    for _ in 0..MAX_ATTEMPTS {
        let port = rng.gen_range(PORT_RANGE_START..=PORT_RANGE_END);
        if is_free(port) {
            return Ok(port);
        }
    }

    Err(SmokeError::PortExhausted(PORT_RANGE_START, PORT_RANGE_END))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picked_port_is_in_dynamic_range() {
        let port = pick_free_port().unwrap();
        assert!(port >= PORT_RANGE_START);
    }

    #[test]
    fn test_picked_port_is_free_at_check_time() {
        let port = pick_free_port().unwrap();
        // Still bindable immediately after selection.
        assert!(is_free(port));
    }

    #[test]
    fn test_bound_port_is_not_free() {
        // Hold a listener open and verify the checker sees it as taken.
        let listener = TcpListener::bind(("127.0.0.1", 0)).unwrap();
        let port = listener.local_addr().unwrap().port();
        assert!(!is_free(port));
        drop(listener);
    }

    #[test]
    fn test_two_picks_both_free() {
        let first = pick_free_port().unwrap();
        let second = pick_free_port().unwrap();
        assert!(is_free(first));
        assert!(is_free(second));
    }
}
