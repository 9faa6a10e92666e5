use crate::error::FragmentError;
use crate::key::derive_key;
use crate::walker::Fragment;

const KEY_PLACEHOLDER: &str = "{key}";

/// Begin/end marker templates wrapped around each fragment. `{key}` is replaced with the
/// fragment key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockMarkers {
    pub begin: &'static str,
    pub end: &'static str,
}

impl BlockMarkers {
    pub const fn new(begin: &'static str, end: &'static str) -> Self {
        Self { begin, end }
    }

    pub fn render_begin(&self, key: &[u8]) -> Vec<u8> {
        render(self.begin, key)
    }

    pub fn render_end(&self, key: &[u8]) -> Vec<u8> {
        render(self.end, key)
    }
}

/// Substitutes raw key bytes, so names that are not valid UTF-8 come out unchanged.
fn render(template: &str, key: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(template.len() + key.len());
    for (i, part) in template.split(KEY_PLACEHOLDER).enumerate() {
        if i > 0 {
            out.extend_from_slice(key);
        }
        out.extend_from_slice(part.as_bytes());
    }
    out
}

#[derive(Debug, Default)]
pub struct TextAggregate {
    pub body: Vec<u8>,
    pub errors: Vec<FragmentError>,
}

/// Concatenates fragments in traversal order, each wrapped in its rendered markers and
/// followed by a blank line. Content bytes are copied untouched; duplicate keys all appear.
pub fn aggregate_text<I>(fragments: I, suffix: &str, markers: &BlockMarkers) -> TextAggregate
where
    I: IntoIterator<Item = Result<Fragment, FragmentError>>,
{
    let mut out = TextAggregate::default();

    for item in fragments {
        let fragment = match item {
            Ok(fragment) => fragment,
            Err(err) => {
                log::warn!("Skipping fragment: {err}");
                out.errors.push(err);
                continue;
            }
        };

        let key = derive_key(fragment.name_bytes(), suffix);
        out.body.extend_from_slice(&markers.render_begin(key));
        out.body.push(b'\n');
        out.body.extend_from_slice(&fragment.content);
        out.body.extend_from_slice(&markers.render_end(key));
        out.body.extend_from_slice(b"\n\n");
    }

    out
}
