use level2_book::{BookConfig, BookHandle, Decimal, DispatchError, OrderMessage, Side};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), DispatchError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let instrument = std::env::args().nth(1).unwrap_or_else(|| "VOD.L".to_string());
    let handle = BookHandle::spawn(&BookConfig::new(instrument))?;
    let book = handle.book();

    let script = [
        OrderMessage::new_order(1, Side::Bid, Decimal::new(940, 2), 10),
        OrderMessage::new_order(2, Side::Bid, Decimal::new(940, 2), 5),
        OrderMessage::new_order(3, Side::Bid, Decimal::new(935, 2), 2),
        OrderMessage::new_order(4, Side::Ask, Decimal::new(945, 2), 10),
        OrderMessage::new_order(5, Side::Ask, Decimal::new(950, 2), 5),
        OrderMessage::new_order(6, Side::Ask, Decimal::new(955, 2), 2),
        OrderMessage::amend(6, Decimal::new(950, 2), 2),
        OrderMessage::trade(1, 4),
        OrderMessage::cancel(3),
    ];
    for message in script {
        handle.submit(message)?;
    }
    let consumed = handle.close()?;

    let book = book.read();
    println!("{} ({} events)", book.instrument(), consumed);
    for side in [Side::Bid, Side::Ask] {
        let top = book.top_of_book(side);
        println!(
            "{side}: top={top} depth={} orders_at_top={}",
            book.book_depth(side),
            book.size_for_price_level(side, top),
        );
        for order in book.orders(side) {
            println!("  {order}");
        }
    }
    Ok(())
}
