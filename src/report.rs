//! Plain-text summary of a composition.
//!
//! One line per spot, then one indented line per item naming the view
//! identifier it resolved to and the registry type that produced it.

use crate::composition::Composition;
use crate::spots::Renderable;
use std::io::{self, Write};

/// Placeholder for an absent identifier or registry type.
const NONE: &str = "-";

/// Resolve every item's view and write the summary to `out`.
///
/// Resolution goes through each spot's registry, so running the report
/// warms the instance caches exactly as a render pass would.
pub fn write_report<W: Write>(out: &mut W, composition: &mut Composition) -> io::Result<()> {
    for position in 0..composition.len() {
        if let Some(spot) = composition.get_mut(position) {
            write_spot(out, spot.as_mut())?;
        }
    }
    Ok(())
}

fn write_spot<W: Write>(out: &mut W, spot: &mut dyn Renderable) -> io::Result<()> {
    let component = spot.component();
    writeln!(
        out,
        "{} {} \"{}\" items={}",
        spot.index(),
        spot.kind(),
        component.title,
        component.items().len()
    )?;

    for at in 0..spot.component().items().len() {
        let identifier = spot.identifier(at);
        let resolved = spot.dequeue_view(at);
        let registry_type = resolved
            .registry_type
            .map_or(NONE, |registry_type| registry_type.as_str());
        let title = spot
            .component()
            .item(at)
            .map_or("", |item| item.title.as_str());
        writeln!(
            out,
            "  {}.{} \"{}\" -> {} ({})",
            spot.index(),
            at,
            title,
            identifier.as_deref().unwrap_or(NONE),
            registry_type
        )?;
    }
    Ok(())
}

/// [`write_report`] into a `String`.
///
/// # Errors
///
/// Propagates any error from [`write_report`].
pub fn render_report(composition: &mut Composition) -> io::Result<String> {
    let mut buffer = Vec::new();
    write_report(&mut buffer, composition)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
