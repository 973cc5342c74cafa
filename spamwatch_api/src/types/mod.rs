mod token;
pub use self::token::{CreatedToken, ParsePermissionError, Permission, Token, TokenID, UserID};

mod ban;
pub use self::ban::{Ban, BanLookup, NewBan};
