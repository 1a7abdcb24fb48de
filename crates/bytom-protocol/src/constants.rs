pub const CURRENT_ASSET_VERSION: u64 = 1;
pub const CURRENT_VM_VERSION: u64 = 1;

pub const ASSET_ID_BYTES: usize = 32;

// The top bit of the 64-bit (resp. 32-bit) value space is reserved.
pub const MAX_VARINT63: u64 = i64::MAX as u64;
pub const MAX_VARINT31: u64 = i32::MAX as u64;

pub const MAX_VARINT_LEN64: usize = 10;
