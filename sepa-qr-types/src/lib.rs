mod amount;
mod charset;
mod version;

pub use amount::Amount;
pub use charset::CharacterSet;
pub use version::Version;
