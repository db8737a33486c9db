use tileboard::locator::LocatorParams;

#[cfg(feature = "tracing")]
use tileboard::core::init_tracing;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing")]
    init_tracing(false);

    let mut args = std::env::args().skip(1);
    let (Some(background), Some(board)) = (args.next(), args.next()) else {
        eprintln!("Usage: locate_board <background_image> <board_image>");
        return Ok(());
    };

    let tiles = tileboard::locate_files(background, board, &LocatorParams::default())?;
    if tiles.is_empty() {
        println!("no tiles found");
    }
    for (i, t) in tiles.iter().enumerate() {
        println!("tile {i}: ({}, {}) {}x{}", t.x, t.y, t.width, t.height);
    }

    Ok(())
}
