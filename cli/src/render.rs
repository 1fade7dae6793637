use dpsmeter_core::MeterSnapshot;
use std::io::{self, Write};

/// Redraw the status line in place.
pub fn draw(snapshot: &MeterSnapshot) -> io::Result<()> {
    let mut out = io::stdout();
    write!(
        out,
        "\rdps {:>9.1}  total {:>10}  avg {:>8.1}  min {:>6}  max {:>6} ",
        snapshot.dps,
        snapshot.total_damage,
        snapshot.average_hit,
        snapshot.minimum_hit,
        snapshot.maximum_hit,
    )?;
    out.flush()
}
