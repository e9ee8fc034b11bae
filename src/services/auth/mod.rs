pub mod access_jwt;
pub mod factory;
pub mod jwt;
pub mod policy;
pub mod principal;

pub use access_jwt::{CredentialVerifier, VerificationError};
pub use factory::build_credential_services;
pub use jwt::{CredentialIssuer, IssuanceError, SigningKey};
pub use policy::{AccessPolicy, Decision, OwnerOnly, ResourceDescriptor, authorize};
pub use principal::Principal;
