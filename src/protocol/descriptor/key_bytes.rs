// Key field of the wire tuple. Encoded as a CBOR byte string (major type 2),
// never as an array of integers, and held in zeroizing storage while the
// payload is being parsed. Length is not checked here; the domain
// constructor reports it with a typed error.
use core::fmt;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use zeroize::Zeroizing;

pub(crate) struct WireKey(pub(crate) Zeroizing<Vec<u8>>);

impl WireKey {
    pub(crate) fn from_slice(bytes: &[u8]) -> Self {
        WireKey(Zeroizing::new(bytes.to_vec()))
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for WireKey {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_bytes(&self.0)
    }
}

impl<'de> Deserialize<'de> for WireKey {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        struct V;
        impl de::Visitor<'_> for V {
            type Value = WireKey;
            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a byte string")
            }
            fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
                Ok(WireKey::from_slice(v))
            }
            fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> Result<Self::Value, E> {
                Ok(WireKey(Zeroizing::new(v)))
            }
        }
        d.deserialize_bytes(V)
    }
}
