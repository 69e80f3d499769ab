use uuid::Uuid;

/// Source of fresh node/entity identities for canvas mirroring.
///
/// Injected rather than called globally so a planning pass can be replayed
/// with deterministic ids under test.
pub trait IdGenerator {
    fn generate(&self) -> String;
}

/// Random, collision-resistant ids. Safe across concurrent mirror
/// operations with no cross-call coordination.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
