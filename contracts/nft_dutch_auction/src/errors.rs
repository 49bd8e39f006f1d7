use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotAuthorized = 3,
    InvalidConfig = 4,
    SaleAlreadyOpen = 5,
    SaleNotOpen = 6,
    AlreadyRevealed = 7,
    MetadataFrozen = 8,
    InvalidQuantity = 9,
    QuantityCapExceeded = 10,
    SupplyExhausted = 11,
    IncorrectPayment = 12,
    TokenNotFound = 13,
    NotTokenOwner = 14,
    NotApproved = 15,
    InvalidRecipient = 16,
    NothingToWithdraw = 17,
}
