//! Fixed-position payload fields.
//!
//! Every message payload is a sequence of fields with a width known at compile
//! time. Integers are little-endian; the two IP address shapes are carried in
//! network byte order, the only big-endian data on the wire.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use bytes::{Buf, BufMut, Bytes, BytesMut};
use serde::{Serialize, Serializer};

/// A value with a fixed position and width inside a message payload.
pub trait WireField: Sized {
    /// Encoded width of the fixed part in bytes.
    const SIZE: usize;

    /// Upper bound including trailing variable data.
    const MAX_SIZE: usize = Self::SIZE;

    /// Append the encoded field to `dst`.
    fn put(&self, dst: &mut BytesMut);

    /// Read the field from the front of `src`.
    ///
    /// Callers guarantee at least `SIZE` readable bytes.
    fn get(src: &mut &[u8]) -> Self;

    /// The value decoded from an all-zero buffer.
    fn zeroed() -> Self;
}

impl WireField for u8 {
    const SIZE: usize = 1;

    fn put(&self, dst: &mut BytesMut) {
        dst.put_u8(*self);
    }

    fn get(src: &mut &[u8]) -> Self {
        src.get_u8()
    }

    fn zeroed() -> Self {
        0
    }
}

impl WireField for u16 {
    const SIZE: usize = 2;

    fn put(&self, dst: &mut BytesMut) {
        dst.put_u16_le(*self);
    }

    fn get(src: &mut &[u8]) -> Self {
        src.get_u16_le()
    }

    fn zeroed() -> Self {
        0
    }
}

impl WireField for u32 {
    const SIZE: usize = 4;

    fn put(&self, dst: &mut BytesMut) {
        dst.put_u32_le(*self);
    }

    fn get(src: &mut &[u8]) -> Self {
        src.get_u32_le()
    }

    fn zeroed() -> Self {
        0
    }
}

impl<T: WireField, const N: usize> WireField for [T; N] {
    const SIZE: usize = T::SIZE * N;
    const MAX_SIZE: usize = T::MAX_SIZE * N;

    fn put(&self, dst: &mut BytesMut) {
        for item in self {
            item.put(dst);
        }
    }

    fn get(src: &mut &[u8]) -> Self {
        std::array::from_fn(|_| T::get(src))
    }

    fn zeroed() -> Self {
        std::array::from_fn(|_| T::zeroed())
    }
}

/// Fixed-width, NUL-padded character field of `N` bytes.
///
/// Values built locally keep room for the terminating NUL; decoded values may
/// use all `N` bytes when the phone sent an unterminated field.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct FixedStr<const N: usize>(String);

impl<const N: usize> FixedStr<N> {
    /// Build a field, truncating on a character boundary to `N - 1` bytes.
    pub fn new(value: &str) -> Self {
        Self(truncate_str(value, N.saturating_sub(1)).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<const N: usize> From<&str> for FixedStr<N> {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<const N: usize> fmt::Debug for FixedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl<const N: usize> fmt::Display for FixedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<const N: usize> Serialize for FixedStr<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<const N: usize> WireField for FixedStr<N> {
    const SIZE: usize = N;

    fn put(&self, dst: &mut BytesMut) {
        let bytes = self.0.as_bytes();
        let used = bytes.len().min(N);
        dst.put_slice(&bytes[..used]);
        dst.put_bytes(0, N - used);
    }

    fn get(src: &mut &[u8]) -> Self {
        let raw = &src[..N];
        let end = raw.iter().position(|b| *b == 0).unwrap_or(N);
        let value = String::from_utf8_lossy(&raw[..end]).into_owned();
        src.advance(N);
        Self(value)
    }

    fn zeroed() -> Self {
        Self(String::new())
    }
}

/// Truncate `value` to at most `max` bytes without splitting a character.
pub fn truncate_str(value: &str, max: usize) -> &str {
    if value.len() <= max {
        return value;
    }
    let mut end = max;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

/// IPv4 address stored in network byte order inside a little-endian payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Be(pub Ipv4Addr);

impl Default for Ipv4Be {
    fn default() -> Self {
        Self(Ipv4Addr::UNSPECIFIED)
    }
}

impl From<Ipv4Addr> for Ipv4Be {
    fn from(addr: Ipv4Addr) -> Self {
        Self(addr)
    }
}

impl Serialize for Ipv4Be {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl WireField for Ipv4Be {
    const SIZE: usize = 4;

    fn put(&self, dst: &mut BytesMut) {
        dst.put_slice(&self.0.octets());
    }

    fn get(src: &mut &[u8]) -> Self {
        Self(Ipv4Addr::from(src.get_u32()))
    }

    fn zeroed() -> Self {
        Self::default()
    }
}

/// 16-byte address field used by v17+ layouts.
///
/// IPv4 occupies the first four bytes, the rest is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IpAddr16(pub IpAddr);

impl Default for IpAddr16 {
    fn default() -> Self {
        Self(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
    }
}

impl From<IpAddr> for IpAddr16 {
    fn from(addr: IpAddr) -> Self {
        Self(addr)
    }
}

impl Serialize for IpAddr16 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl WireField for IpAddr16 {
    const SIZE: usize = 16;

    fn put(&self, dst: &mut BytesMut) {
        match self.0 {
            IpAddr::V4(v4) => {
                dst.put_slice(&v4.octets());
                dst.put_bytes(0, 12);
            }
            IpAddr::V6(v6) => dst.put_slice(&v6.octets()),
        }
    }

    fn get(src: &mut &[u8]) -> Self {
        let mut octets = [0u8; 16];
        src.copy_to_slice(&mut octets);
        if octets[4..].iter().all(|b| *b == 0) {
            Self(IpAddr::V4(Ipv4Addr::new(
                octets[0], octets[1], octets[2], octets[3],
            )))
        } else {
            Self(IpAddr::V6(Ipv6Addr::from(octets)))
        }
    }

    fn zeroed() -> Self {
        Self::default()
    }
}

/// Trailing variable-length data of at most `MAX` bytes.
///
/// Only valid as the last field of a layout: it consumes whatever follows the
/// fixed part of the payload.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Blob<const MAX: usize>(pub Bytes);

impl<const MAX: usize> Blob<MAX> {
    /// Wrap raw bytes, truncated to `MAX`.
    pub fn new(data: impl Into<Bytes>) -> Self {
        let mut data: Bytes = data.into();
        data.truncate(MAX);
        Self(data)
    }

    /// NUL-terminated text padded to a four byte boundary, as carried by
    /// the dynamic display messages.
    pub fn text(value: &str) -> Self {
        let value = truncate_str(value, MAX.saturating_sub(1));
        let padded = ((value.len() + 1 + 3) & !3).min(MAX);
        let mut data = BytesMut::with_capacity(padded);
        data.put_slice(value.as_bytes());
        data.put_bytes(0, padded - value.len());
        Self(data.freeze())
    }

    /// Several NUL-terminated strings back to back, padded to four bytes.
    pub fn strings(parts: &[&str]) -> Self {
        let mut data = BytesMut::new();
        for part in parts {
            data.put_slice(part.as_bytes());
            data.put_u8(0);
        }
        let padded = (data.len() + 3) & !3;
        data.put_bytes(0, padded - data.len());
        data.truncate(MAX);
        Self(data.freeze())
    }

    /// The first `count` NUL-terminated strings; missing ones are empty.
    pub fn split_strings(&self, count: usize) -> Vec<String> {
        let mut parts: Vec<String> = self
            .0
            .split(|b| *b == 0)
            .take(count)
            .map(|part| String::from_utf8_lossy(part).into_owned())
            .collect();
        parts.resize(count, String::new());
        parts
    }

    /// Text up to the first NUL.
    pub fn as_text(&self) -> String {
        let end = self.0.iter().position(|b| *b == 0).unwrap_or(self.0.len());
        String::from_utf8_lossy(&self.0[..end]).into_owned()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<const MAX: usize> fmt::Debug for Blob<MAX> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} bytes>", self.0.len())
    }
}

impl<const MAX: usize> Serialize for Blob<MAX> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(&self.0))
    }
}

impl<const MAX: usize> WireField for Blob<MAX> {
    const SIZE: usize = 0;
    const MAX_SIZE: usize = MAX;

    fn put(&self, dst: &mut BytesMut) {
        let used = self.0.len().min(MAX);
        dst.put_slice(&self.0[..used]);
    }

    fn get(src: &mut &[u8]) -> Self {
        let take = src.len().min(MAX);
        let data = Bytes::copy_from_slice(&src[..take]);
        src.advance(take);
        Self(data)
    }

    fn zeroed() -> Self {
        Self(Bytes::new())
    }
}

/// Serialize a fixed array of any length as a sequence.
///
/// serde only implements `Serialize` for arrays up to 32 elements.
pub fn serialize_array<S, T, const N: usize>(items: &[T; N], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize,
{
    serializer.collect_seq(items.iter())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode<T: WireField>(value: &T) -> BytesMut {
        let mut buf = BytesMut::new();
        value.put(&mut buf);
        buf
    }

    #[test]
    fn integers_are_little_endian() {
        assert_eq!(encode(&0x0102_0304u32).as_ref(), &[4, 3, 2, 1]);
        assert_eq!(encode(&0x0102u16).as_ref(), &[2, 1]);
    }

    #[test]
    fn fixed_str_pads_and_truncates() {
        let value = FixedStr::<8>::new("SEP00112233");
        assert_eq!(value.as_str(), "SEP0011");

        let buf = encode(&value);
        assert_eq!(buf.len(), 8);
        assert_eq!(buf[7], 0);

        let decoded = FixedStr::<8>::get(&mut buf.as_ref());
        assert_eq!(decoded, value);
    }

    #[test]
    fn fixed_str_truncates_on_char_boundary() {
        let value = FixedStr::<4>::new("aé€");
        assert_eq!(value.as_str(), "aé");
    }

    #[test]
    fn fixed_str_accepts_unterminated_input() {
        let raw = *b"ABCD";
        let decoded = FixedStr::<4>::get(&mut raw.as_ref());
        assert_eq!(decoded.as_str(), "ABCD");
    }

    #[test]
    fn ipv4_is_network_order() {
        let addr = Ipv4Be(Ipv4Addr::new(192, 168, 1, 20));
        assert_eq!(encode(&addr).as_ref(), &[192, 168, 1, 20]);
    }

    #[test]
    fn ip16_distinguishes_families() {
        let v4 = IpAddr16(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)));
        let buf = encode(&v4);
        assert_eq!(buf.len(), 16);
        assert_eq!(IpAddr16::get(&mut buf.as_ref()), v4);

        let v6 = IpAddr16(IpAddr::V6("2001:db8::1".parse().unwrap()));
        let buf = encode(&v6);
        assert_eq!(IpAddr16::get(&mut buf.as_ref()), v6);
    }

    #[test]
    fn blob_consumes_remaining_up_to_max() {
        let raw = [1u8, 2, 3, 4, 5, 6];
        let mut src = raw.as_ref();
        let blob = Blob::<4>::get(&mut src);
        assert_eq!(blob.0.as_ref(), &[1, 2, 3, 4]);
        assert_eq!(src, &[5, 6]);
    }

    #[test]
    fn blob_text_is_nul_terminated() {
        let blob = Blob::<16>::text("Hello");
        assert_eq!(blob.0.as_ref(), b"Hello\0\0\0");
        assert_eq!(blob.as_text(), "Hello");

        let exact = Blob::<16>::text("abc");
        assert_eq!(exact.len(), 4);
    }

    #[test]
    fn blob_strings_split_back() {
        let blob = Blob::<64>::strings(&["100", "", "Alice"]);
        assert_eq!(blob.len() % 4, 0);
        assert_eq!(blob.split_strings(4), vec!["100", "", "Alice", ""]);
    }

    #[test]
    fn arrays_have_combined_size() {
        assert_eq!(<[u32; 5] as WireField>::SIZE, 20);
        assert_eq!(<[FixedStr<48>; 5] as WireField>::SIZE, 240);
        let zero = <[u16; 3] as WireField>::zeroed();
        assert_eq!(zero, [0, 0, 0]);
    }
}
