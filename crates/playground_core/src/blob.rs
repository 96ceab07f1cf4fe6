use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// MIME type of every blob resource the session publishes.
pub const SVG_MIME: &str = "image/svg+xml";

/// One of the two document buffers the session manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    Input,
    Output,
}

impl Slot {
    pub const ALL: [Slot; 2] = [Slot::Input, Slot::Output];

    pub fn id(self) -> &'static str {
        match self {
            Slot::Input => "input",
            Slot::Output => "output",
        }
    }

    /// Suggested file name for downloads.
    pub fn file_name(self) -> &'static str {
        match self {
            Slot::Input => "input.svg",
            Slot::Output => "optimized.svg",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Slot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Slot::ALL
            .into_iter()
            .find(|slot| slot.id() == s)
            .ok_or_else(|| format!("unknown slot {s:?}"))
    }
}

/// Session-local, revocable handle to in-memory text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlobUrl(String);

impl BlobUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlobUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resource lifecycle change the platform has to mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlobChange {
    Published { url: BlobUrl, text: String },
    Revoked { url: BlobUrl },
}

/// Lazily created blob handles per slot.
///
/// Every handle handed out is released exactly once, through `invalidate` or
/// `drain`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlobCache {
    next_id: u64,
    urls: BTreeMap<Slot, BlobUrl>,
}

impl BlobCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: Slot) -> Option<&BlobUrl> {
        self.urls.get(&slot)
    }

    /// Returns the cached handle for `slot`, creating one over `text` if absent.
    pub fn get_or_create(&mut self, slot: Slot, text: &str) -> (BlobUrl, Option<BlobChange>) {
        if let Some(url) = self.urls.get(&slot) {
            return (url.clone(), None);
        }
        self.next_id += 1;
        let url = BlobUrl(format!("blob:playground/{}-{}", slot.id(), self.next_id));
        self.urls.insert(slot, url.clone());
        let change = BlobChange::Published {
            url: url.clone(),
            text: text.to_string(),
        };
        (url, Some(change))
    }

    /// Releases the handle for `slot`, if any.
    pub fn invalidate(&mut self, slot: Slot) -> Option<BlobChange> {
        self.urls
            .remove(&slot)
            .map(|url| BlobChange::Revoked { url })
    }

    /// Releases every remaining handle.
    pub fn drain(&mut self) -> Vec<BlobChange> {
        std::mem::take(&mut self.urls)
            .into_values()
            .map(|url| BlobChange::Revoked { url })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_parse_from_ids() {
        assert_eq!("input".parse::<Slot>(), Ok(Slot::Input));
        assert_eq!("output".parse::<Slot>(), Ok(Slot::Output));
        assert!("config".parse::<Slot>().is_err());
    }

    #[test]
    fn empty_text_still_publishes() {
        let mut cache = BlobCache::new();
        let (url, change) = cache.get_or_create(Slot::Output, "");
        assert_eq!(
            change,
            Some(BlobChange::Published {
                url,
                text: String::new()
            })
        );
    }

    #[test]
    fn invalidate_without_handle_is_silent() {
        let mut cache = BlobCache::new();
        assert_eq!(cache.invalidate(Slot::Input), None);
    }
}
