//! Query-then-fill buffer negotiation
//!
//! Several C serialization APIs report the needed capacity when called with a
//! null destination, then write into a caller buffer on a second call. The
//! size argument is in/out: capacity going in, bytes written coming out.

/// Run the two-call protocol against `call`.
///
/// `call` receives `None` for the size query and `Some(buffer)` for the fill,
/// plus the in/out size, and returns whether the native call succeeded.
/// Returns `None` if either phase fails; the allocated buffer is dropped on
/// that path.
pub fn query_then_fill<F>(mut call: F) -> Option<Vec<u8>>
where
    F: FnMut(Option<&mut [u8]>, &mut u32) -> bool,
{
    let mut needed = 0u32;
    if !call(None, &mut needed) {
        return None;
    }
    if needed == 0 {
        return Some(Vec::new());
    }

    let mut buffer = vec![0u8; needed as usize];
    let mut written = needed;
    if !call(Some(&mut buffer), &mut written) {
        return None;
    }

    buffer.truncate(written as usize);
    Some(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_phases() {
        let payload = b"acsp-profile";
        let mut calls = Vec::new();

        let out = query_then_fill(|dst, size| {
            calls.push(dst.is_some());
            match dst {
                None => *size = payload.len() as u32,
                Some(buf) => {
                    assert_eq!(buf.len(), payload.len());
                    assert_eq!(*size as usize, payload.len());
                    buf.copy_from_slice(payload);
                }
            }
            true
        });

        assert_eq!(out.as_deref(), Some(&payload[..]));
        assert_eq!(calls, [false, true]);
    }

    #[test]
    fn test_query_failure() {
        let mut fills = 0;
        let out = query_then_fill(|dst, _| {
            if dst.is_some() {
                fills += 1;
            }
            false
        });
        assert!(out.is_none());
        assert_eq!(fills, 0);
    }

    #[test]
    fn test_fill_failure() {
        let out = query_then_fill(|dst, size| match dst {
            None => {
                *size = 64;
                true
            }
            Some(_) => false,
        });
        assert!(out.is_none());
    }

    #[test]
    fn test_zero_size_skips_fill() {
        let mut calls = 0;
        let out = query_then_fill(|_, size| {
            calls += 1;
            *size = 0;
            true
        });
        assert_eq!(out, Some(Vec::new()));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_short_write_truncates() {
        let out = query_then_fill(|dst, size| {
            match dst {
                None => *size = 16,
                Some(buf) => {
                    buf[..4].copy_from_slice(&[1, 2, 3, 4]);
                    *size = 4;
                }
            }
            true
        });
        assert_eq!(out, Some(vec![1, 2, 3, 4]));
    }
}
