//! Cheap structural bounds on JSON text, checked before the text is parsed.

use paseto4_core::PasetoError;

/// Bounds for JSON payloads and footers. A limit of `0` disables that check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizeLimits {
    pub max_depth: usize,
    pub max_keys: usize,
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self {
            max_depth: 32,
            max_keys: 128,
        }
    }
}

impl SizeLimits {
    pub const UNBOUNDED: Self = Self {
        max_depth: 0,
        max_keys: 0,
    };
}

struct Shape {
    max_open: usize,
    colons: usize,
}

fn scan(json: &str) -> Shape {
    let mut shape = Shape {
        max_open: 0,
        colons: 0,
    };
    let mut open = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for b in json.bytes() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' | b'[' => {
                open += 1;
                shape.max_open = shape.max_open.max(open);
            }
            b'}' | b']' => open = open.saturating_sub(1),
            b':' => shape.colons += 1,
            _ => {}
        }
    }
    shape
}

/// Nesting depth of `json`. A flat object counts as 2: one for the object and
/// one for its values.
pub fn json_depth(json: &str) -> usize {
    scan(json).max_open + 1
}

/// Approximate number of keys in `json`: one more than the key separators
/// found outside of strings.
pub fn count_keys(json: &str) -> usize {
    scan(json).colons + 1
}

/// Reject `json` if it is nested deeper or has more keys than `limits` allow.
pub fn assert_size_bounds(json: &str, limits: &SizeLimits) -> Result<(), PasetoError> {
    if limits.max_depth == 0 && limits.max_keys == 0 {
        return Ok(());
    }

    let shape = scan(json);
    let depth = shape.max_open + 1;
    let keys = shape.colons + 1;

    if limits.max_depth > 0 && depth > limits.max_depth {
        return Err(PasetoError::SizeExceeded(format!(
            "depth {depth} exceeds the limit of {}",
            limits.max_depth
        )));
    }
    if limits.max_keys > 0 && keys > limits.max_keys {
        return Err(PasetoError::SizeExceeded(format!(
            "{keys} keys exceeds the limit of {}",
            limits.max_keys
        )));
    }
    Ok(())
}
