//! MessagePack serialization for a closed dynamic value model.
//!
//! [`Value`] covers nil, booleans, signed and unsigned 64-bit integers,
//! 32- and 64-bit floats, UTF-8 strings, binary blobs, arrays, maps with
//! arbitrary keys, application extensions and the reserved timestamp
//! extension. [`encode`] and [`decode`] convert between a `Value` tree and
//! the MessagePack wire format.
//!
//! ```
//! use msgpack_ref::{decode, encode, Timestamp, Value};
//!
//! let value = Value::Array(vec![
//!     Value::Str("hello".into()),
//!     Value::Timestamp(Timestamp::new(1_700_000_000, 0)),
//! ]);
//! let bytes = encode(&value);
//! assert_eq!(decode(&bytes).unwrap(), value);
//! ```

pub mod constants;
pub mod convert;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod ext;
pub mod timestamp;
pub mod util;
pub mod value;

pub use convert::{from_value, to_value};
pub use decoder::MsgPackDecoder;
pub use encoder::MsgPackEncoder;
pub use error::{Malformed, MsgPackError};
pub use ext::{Extension, TIMESTAMP_EXT_TYPE};
pub use timestamp::{Timestamp, TimestampLayout};
pub use util::{decode, decode_with_consumed, encode, encode_with_capacity};
pub use value::{Map, Value};
