pub mod auth;
pub mod order;
pub mod product;

/// Capability contract for resources that carry an owner.
///
/// Mutation of any implementing resource is gated on the caller identity
/// matching the returned owner; a resource that exposes no owner cannot be
/// mutated at all.
pub trait Owned {
    /// Identifier of the user who exclusively controls mutation.
    fn owner(&self) -> Option<&str>;
}
