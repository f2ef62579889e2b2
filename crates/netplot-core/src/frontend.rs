//! The renderer contract shared by every output format.

use std::io::Write;

use chrono::{DateTime, Local, TimeZone};

use netplot_error::Result;

use crate::VERSION;
use crate::label::PrintMask;
use crate::topology::Topology;

/// Provenance written into the header of every rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    pub version: String,
    pub date: String,
}

impl Stamp {
    /// Stamp with the current local time.
    pub fn now() -> Self {
        Self::at(&Local::now())
    }

    /// Stamp for a fixed moment, formatted like ctime(3) without the newline.
    pub fn at<Tz: TimeZone>(when: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            version: VERSION.to_string(),
            date: when.format("%a %b %e %H:%M:%S %Y").to_string(),
        }
    }

    pub fn fixed(version: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            date: date.into(),
        }
    }
}

/// An output format.
///
/// Renderers only read the topology; the sink is the single mutable resource
/// and any write failure aborts the render.
pub trait Frontend: Send + Sync {
    /// Short name used to select the format, e.g. `dot`.
    fn format(&self) -> &'static str;

    /// One line description for format listings.
    fn description(&self) -> &'static str;

    fn render_with_stamp(
        &self,
        topo: &Topology,
        mask: PrintMask,
        stamp: &Stamp,
        sink: &mut dyn Write,
    ) -> Result<()>;

    fn render(&self, topo: &Topology, mask: PrintMask, sink: &mut dyn Write) -> Result<()> {
        self.render_with_stamp(topo, mask, &Stamp::now(), sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_stamp_uses_ctime_layout() {
        let when = Utc.with_ymd_and_hms(2015, 3, 7, 9, 4, 5).unwrap();
        let stamp = Stamp::at(&when);
        assert_eq!(stamp.date, "Sat Mar  7 09:04:05 2015");
        assert_eq!(stamp.version, VERSION);
    }
}
