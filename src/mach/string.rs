use super::val::StrDesc;
use super::{STRING_MAX, STRING_SPACE};
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## String space
///
/// A fixed-capacity bump allocator. Allocation appends and advances the
/// high-water mark; nothing is ever freed individually. CLEAR, NEW, and RUN
/// reset the whole space. The garbage-collection hook exists so FRE can call
/// it, and does nothing.
#[derive(Debug)]
pub struct StringHeap {
    space: Vec<u8>,
}

impl Default for StringHeap {
    fn default() -> StringHeap {
        StringHeap {
            space: Vec::with_capacity(STRING_SPACE),
        }
    }
}

impl StringHeap {
    pub fn new() -> StringHeap {
        StringHeap::default()
    }

    /// Copies `body` into the space and returns its descriptor.
    pub fn alloc(&mut self, body: &[u8]) -> Result<StrDesc> {
        if body.len() > STRING_MAX {
            return Err(error!(StringTooLong));
        }
        if body.is_empty() {
            return Ok(StrDesc::empty());
        }
        if self.space.len() + body.len() > STRING_SPACE {
            self.collect();
            if self.space.len() + body.len() > STRING_SPACE {
                return Err(error!(OutOfMemory));
            }
        }
        let off = self.space.len();
        self.space.extend_from_slice(body);
        Ok(StrDesc::new(off, body.len()))
    }

    /// Concatenation without an intermediate buffer.
    pub fn concat(&mut self, lhs: StrDesc, rhs: StrDesc) -> Result<StrDesc> {
        let len = lhs.len() + rhs.len();
        if len > STRING_MAX {
            return Err(error!(StringTooLong));
        }
        if self.space.len() + len > STRING_SPACE {
            return Err(error!(OutOfMemory));
        }
        let off = self.space.len();
        let range = |d: &StrDesc| d.offset()..d.offset() + d.len();
        self.space.extend_from_within(range(&lhs));
        self.space.extend_from_within(range(&rhs));
        Ok(StrDesc::new(off, len))
    }

    pub fn bytes(&self, off: usize, len: usize) -> &[u8] {
        &self.space[off..off + len]
    }

    pub fn free(&self) -> usize {
        STRING_SPACE - self.space.len()
    }

    pub fn clear(&mut self) {
        self.space.clear();
    }

    /// Garbage collection hook. Compaction is deliberately unimplemented;
    /// nothing is reclaimed until CLEAR/NEW/RUN reset the space.
    pub fn collect(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_and_fetch() {
        let mut heap = StringHeap::new();
        let d = heap.alloc(b"HELLO").unwrap();
        assert_eq!(d.len(), 5);
        assert_eq!(d.bytes(&heap), b"HELLO");
    }

    #[test]
    fn test_empty_costs_nothing() {
        let mut heap = StringHeap::new();
        let before = heap.free();
        let d = heap.alloc(b"").unwrap();
        assert_eq!(d.len(), 0);
        assert_eq!(heap.free(), before);
    }

    #[test]
    fn test_too_long() {
        let mut heap = StringHeap::new();
        let body = vec![b'X'; 256];
        assert_eq!(
            heap.alloc(&body).unwrap_err().code(),
            crate::lang::ErrorCode::StringTooLong
        );
    }

    #[test]
    fn test_exhaustion() {
        let mut heap = StringHeap::new();
        let chunk = vec![b'X'; 255];
        loop {
            match heap.alloc(&chunk) {
                Ok(_) => {}
                Err(e) => {
                    assert_eq!(e.code(), crate::lang::ErrorCode::OutOfMemory);
                    break;
                }
            }
        }
        heap.clear();
        assert!(heap.alloc(&chunk).is_ok());
    }

    #[test]
    fn test_concat() {
        let mut heap = StringHeap::new();
        let a = heap.alloc(b"FOO").unwrap();
        let b = heap.alloc(b"BAR").unwrap();
        let c = heap.concat(a, b).unwrap();
        assert_eq!(c.bytes(&heap), b"FOOBAR");
    }
}
