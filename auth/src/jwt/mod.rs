pub mod claims;
pub mod codec;
pub mod errors;
pub mod guard;
pub mod issuer;

pub use claims::Claims;
pub use claims::TokenKind;
pub use codec::TokenCodec;
pub use errors::JwtError;
pub use guard::TokenGuard;
pub use issuer::TokenIssuer;
pub use issuer::TokenLifetimes;
