use escpos_markdown::{
    Printer, PrinterProfile, Justification,
    graphics::QrErrorCorrection,
    sink::DebugSink
};

const MENU: &str = "# Corner Cafe
## Order 42
---
- Flat white
- Croissant **warm**
1. Pay at the counter
";

const TOTALS: &str = "| Item | Qty | Price |
|---|---|---|
| Flat white | 1 | 3.20 |
| Croissant | 2 | 5.00 |
";

fn main() {
    let printer_profile = PrinterProfile::debug_builder().with_columns(48).build();
    // Nothing is sent anywhere, the sink keeps the bytes
    let mut printer = Printer::new(DebugSink::new(), printer_profile);
    printer.initialize();

    if let Err(e) = printer.write_markdown(MENU) {
        println!("Error: {}", e);
    }
    printer.line_feed();
    match printer.write_document(TOTALS) {
        Ok(_) => (),
        Err(e) => println!("Error: {}", e)
    }

    printer.justify(Justification::Center);
    match printer.ean13("590123412345") {
        Ok(_) => (),
        Err(e) => println!("Error: {}", e)
    }
    printer.line_feed();
    match printer.qr_code("https://example.com/order/42", true, 6, QrErrorCorrection::M) {
        Ok(_) => (),
        Err(e) => println!("Error: {}", e)
    }
    printer.reset_styles().feed(3);

    match printer.print_and_cut() {
        Ok(sent) => {
            println!("{}", printer.sink().pretty_print());
            println!("\nTotal bytes: {}", sent);
        },
        Err(e) => println!("Error: {}", e)
    }
}
