//! Shared test utilities for domain testing
//!
//! This crate provides reusable test infrastructure:
//! - `TestMailpit`: Mailpit SMTP capture container with automatic cleanup
//! - `TestDataBuilder`: Deterministic test data generation
//! - `assertions`: Custom assertion helpers
//! - `init_test_tracing`: Route `tracing` output to the test harness
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDataBuilder, TestMailpit};
//!
//! #[tokio::test]
//! async fn my_smtp_test() {
//!     let mailpit = TestMailpit::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let order_id = builder.order_id();
//!     let recipient = builder.email("buyer");
//!     // send through 127.0.0.1:{mailpit.smtp_port}, then:
//!     let messages = mailpit.messages().await;
//! }
//! ```

mod mailpit;

pub use mailpit::{MailpitMessage, TestMailpit};

use core_config::Environment;

/// Install the development tracing subscriber so failing tests show provider logs.
pub fn init_test_tracing() {
    core_config::tracing::init_tracing(&Environment::Development);
}

/// Builder for test data with deterministic randomization
///
/// This ensures tests are reproducible by using seeded data.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_send_order_email");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// A 24-character hex order id, shaped like a document `_id`.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let id = TestDataBuilder::new(7).order_id();
    /// assert_eq!(id.len(), 24);
    /// ```
    pub fn order_id(&self) -> String {
        format!("{:016x}{:08x}", self.seed, (self.seed >> 32) as u32 ^ 0x5eed)
    }

    /// A unique address on the reserved `example.com` domain.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let email = TestDataBuilder::new(42).email("buyer");
    /// assert_eq!(email, "buyer-42@example.com");
    /// ```
    pub fn email(&self, local: &str) -> String {
        format!("{}-{}@example.com", local, self.seed)
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Assert that every needle appears in `haystack`, in the given order.
    pub fn assert_in_order(haystack: &str, needles: &[&str]) {
        let mut offset = 0;
        for needle in needles {
            match haystack[offset..].find(needle) {
                Some(pos) => offset += pos + needle.len(),
                None => panic!(
                    "expected {:?} after byte {} in:\n{}",
                    needle, offset, haystack
                ),
            }
        }
    }

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }
}

#[cfg(test)]
mod tests {
    use super::assertions::*;
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let builder1 = TestDataBuilder::new(42);
        let builder2 = TestDataBuilder::new(42);

        assert_eq!(builder1.order_id(), builder2.order_id());
        assert_eq!(builder1.email("buyer"), builder2.email("buyer"));
    }

    #[test]
    fn test_data_builder_different_names() {
        let builder1 = TestDataBuilder::from_test_name("test1");
        let builder2 = TestDataBuilder::from_test_name("test2");

        assert_ne!(builder1.order_id(), builder2.order_id());
    }

    #[test]
    fn test_order_id_is_hex() {
        let id = TestDataBuilder::from_test_name("hex").order_id();
        assert_eq!(id.len(), 24);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_assert_in_order_passes() {
        assert_in_order("a1 b2 c3", &["a1", "b2", "c3"]);
    }

    #[test]
    #[should_panic(expected = "expected \"a1\"")]
    fn test_assert_in_order_detects_reordering() {
        assert_in_order("a1 b2 c3", &["b2", "a1"]);
    }

    #[test]
    fn test_assert_some() {
        assert_eq!(assert_some(Some(3), "value"), 3);
    }
}
