pub use self::printer_profile::{PrinterProfile, PrinterConnectionData, PrinterProfileBuilder};
pub use self::printer_model::PrinterModel;

mod printer_profile;
mod printer_model;

use std::io::Write;
use image::DynamicImage;
use log::debug;
use crate::{
    Error,
    CharacterSet,
    Style, Justification, Underline,
    command::{Command, Charset},
    graphics::{self, Symbology, HriPosition, QrErrorCorrection, Raster, RasterOptions}
};

/// Main escpos-markdown structure, one print session
///
/// The printer owns the current [Style](crate::Style), the active character table, and an append-only command stream. Every operation appends to the stream right away, nothing is batched or diffed against the previous state: calling a setter twice emits its command twice. The stream only reaches the sink when [print](Printer::print) is called.
///
/// ```rust
/// use escpos_markdown::{Printer, PrinterProfile, Justification};
///
/// let mut printer = Printer::new(Vec::new(), PrinterProfile::default());
/// printer.justify(Justification::Center).bold(true);
/// printer.write("Hello!")?;
/// printer.line_feed();
/// printer.print_and_cut()?;
/// assert_eq!(printer.sink(), &vec![0x1b, 0x61, 0x01, 0x1b, 0x45, 0x01, b'H', b'e', b'l', b'l', b'o', b'!', 0x0a, 0x1d, 0x56, 0x41, 0x96]);
/// # Ok::<(), escpos_markdown::Error>(())
/// ```
pub struct Printer<W: Write> {
    printer_profile: PrinterProfile,
    /// Single source of truth for the current formatting
    style: Style,
    /// Table used to encode text
    charset: CharacterSet,
    hri_position: HriPosition,
    /// Commands not yet sent to the sink
    buffer: Vec<u8>,
    sink: W
}

impl<W: Write> Printer<W> {
    /// Creates a session in the canonical default style, writing to `sink`
    pub fn new(sink: W, printer_profile: PrinterProfile) -> Printer<W> {
        Printer {
            charset: printer_profile.default_charset(),
            printer_profile,
            style: Style::default(),
            hri_position: HriPosition::default(),
            buffer: Vec::new(),
            sink
        }
    }

    pub fn profile(&self) -> &PrinterProfile {
        &self.printer_profile
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Character table that [write](Printer::write) encodes with
    pub fn charset(&self) -> CharacterSet {
        self.charset
    }

    /// Command stream accumulated since the last [print](Printer::print)
    pub fn bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }

    /// Gives the sink back, dropping whatever was not printed
    pub fn into_sink(self) -> W {
        self.sink
    }

    fn push(&mut self, command: Command) {
        self.buffer.extend_from_slice(&command.as_bytes());
    }

    /// Clears the device buffer and restores its power-on modes (ESC @)
    pub fn initialize(&mut self) -> &mut Self {
        self.push(Command::Initialize);
        self
    }

    pub fn justify(&mut self, justification: Justification) -> &mut Self {
        self.style.justify = justification;
        self.push(Command::Justify{justification});
        self
    }

    pub fn bold(&mut self, on: bool) -> &mut Self {
        self.style.bold = on;
        self.push(Command::Bold{on});
        self
    }

    /// 0 turns the underline off, 1 is thin and 2 is thick
    pub fn underline(&mut self, level: u8) -> &mut Self {
        let underline = Underline::from_level(level);
        self.style.underline = underline;
        self.push(Command::Underline{underline});
        self
    }

    pub fn reverse(&mut self, on: bool) -> &mut Self {
        self.style.reverse = on;
        self.push(Command::Reverse{on});
        self
    }

    pub fn rotate(&mut self, on: bool) -> &mut Self {
        self.style.rotate = on;
        self.push(Command::Rotate{on});
        self
    }

    pub fn upside_down(&mut self, on: bool) -> &mut Self {
        self.style.upside_down = on;
        self.push(Command::UpsideDown{on});
        self
    }

    /// Character magnification, both values clamped to 1..8
    pub fn size(&mut self, width: u8, height: u8) -> &mut Self {
        let width = width.max(1).min(8);
        let height = height.max(1).min(8);
        self.style.width = width;
        self.style.height = height;
        self.push(Command::Size{width, height});
        self
    }

    /// Emits every field of `style`, making the device match it
    pub fn set_style(&mut self, style: Style) -> &mut Self {
        self.size(style.width, style.height)
            .bold(style.bold)
            .justify(style.justify)
            .underline(style.underline.as_byte())
            .reverse(style.reverse)
            .rotate(style.rotate)
            .upside_down(style.upside_down)
    }

    /// Records a magnification already sent to the device as raw bytes
    pub(crate) fn track_size(&mut self, width: u8, height: u8) {
        self.style.width = width;
        self.style.height = height;
    }

    /// Back to the canonical default style, on the device as well
    pub fn reset_styles(&mut self) -> &mut Self {
        self.set_style(Style::default())
    }

    /// Selects the character table for the following text
    pub fn select_charset(&mut self, charset: CharacterSet) -> &mut Self {
        debug!("switching character table to {:?}", charset);
        self.charset = charset;
        self.push(charset.select_command());
        self
    }

    /// National variant of the ascii positions (ESC R)
    pub fn international_charset(&mut self, charset: Charset) -> &mut Self {
        self.push(Command::SelectCharset{charset});
        self
    }

    /// Appends a line feed, returns the bytes written
    pub fn line_feed(&mut self) -> usize {
        self.write_raw(&Command::LineFeed.as_bytes())
    }

    /// Prints and feeds `lines` lines
    pub fn feed(&mut self, lines: u8) -> &mut Self {
        self.push(Command::Feed{lines});
        self
    }

    /// Feeds and cuts the paper, returns the bytes written
    pub fn cut(&mut self) -> usize {
        self.write_raw(&Command::Cut.as_bytes())
    }

    /// Writes text with the active character table
    ///
    /// Returns the number of encoded bytes. On error nothing from `text` is appended.
    pub fn write<A: AsRef<str>>(&mut self, text: A) -> Result<usize, Error> {
        let encoded = self.charset.encode(text.as_ref())?;
        Ok(self.write_raw(&encoded))
    }

    /// Switches to the GBK table, then writes. The device stays in GBK mode afterwards.
    ///
    /// The table switch is not undone when encoding fails.
    pub fn write_gbk<A: AsRef<str>>(&mut self, text: A) -> Result<usize, Error> {
        self.select_charset(CharacterSet::Gbk);
        self.write(text)
    }

    /// Switches to the western european table, then writes
    pub fn write_weu<A: AsRef<str>>(&mut self, text: A) -> Result<usize, Error> {
        self.select_charset(CharacterSet::Weu);
        self.write(text)
    }

    /// Appends bytes with no interpretation at all
    pub fn write_raw<A: AsRef<[u8]>>(&mut self, bytes: A) -> usize {
        let bytes = bytes.as_ref();
        self.buffer.extend_from_slice(bytes);
        bytes.len()
    }

    /// Position of the digits printed along with barcodes, used by the next barcodes
    pub fn hri_position(&mut self, position: HriPosition) -> &mut Self {
        self.hri_position = position;
        self.push(Command::HriPosition{position: position.as_byte()});
        self
    }

    fn barcode(&mut self, symbology: Symbology, digits: &str) -> Result<usize, Error> {
        let feed = graphics::barcode(symbology, digits, self.hri_position)?;
        Ok(self.write_raw(&feed))
    }

    /// UPC-A from 11 digits (check digit computed) or 12 digits (trusted as is)
    ///
    /// ```rust
    /// use escpos_markdown::{Printer, PrinterProfile};
    ///
    /// let mut printer = Printer::new(Vec::new(), PrinterProfile::default());
    /// printer.upca("12345678901")?;
    /// assert!(printer.bytes().ends_with(b"123456789012"));
    /// # Ok::<(), escpos_markdown::Error>(())
    /// ```
    pub fn upca(&mut self, digits: &str) -> Result<usize, Error> {
        self.barcode(Symbology::UpcA, digits)
    }

    /// EAN-13 from 12 or 13 digits
    pub fn ean13(&mut self, digits: &str) -> Result<usize, Error> {
        self.barcode(Symbology::Ean13, digits)
    }

    /// EAN-8 from 7 or 8 digits
    pub fn ean8(&mut self, digits: &str) -> Result<usize, Error> {
        self.barcode(Symbology::Ean8, digits)
    }

    /// Native qr code, model 2 when `large`, model 1 otherwise
    pub fn qr_code<A: AsRef<[u8]>>(&mut self, data: A, large: bool, module_size: u8, ecc: QrErrorCorrection) -> Result<usize, Error> {
        let feed = graphics::qr_code(data.as_ref(), large, module_size, ecc)?;
        Ok(self.write_raw(&feed))
    }

    /// Qr code drawn as a raster image, for printers without the qr function
    pub fn qr_code_image<A: AsRef<[u8]>>(&mut self, data: A, module_size: u8, ecc: QrErrorCorrection) -> Result<usize, Error> {
        let bitmap = graphics::qr_bitmap(data.as_ref(), module_size, ecc)?;
        self.print_image_with(&DynamicImage::ImageLuma8(bitmap), &RasterOptions::default())
    }

    /// Prints a bitmap scaled to the paper width, thresholded at mid gray
    pub fn print_image(&mut self, image: &DynamicImage) -> Result<usize, Error> {
        self.print_image_with(image, &RasterOptions::default())
    }

    pub fn print_image_with(&mut self, image: &DynamicImage, options: &RasterOptions) -> Result<usize, Error> {
        let raster = Raster::from_image(image, self.printer_profile.width() as u32, options)?;
        Ok(self.write_raw(&raster.feed()))
    }

    /// Decodes png, jpeg, gif or bmp data and prints it
    pub fn print_image_bytes<A: AsRef<[u8]>>(&mut self, source: A) -> Result<usize, Error> {
        let image = graphics::decode_image(source.as_ref())?;
        self.print_image(&image)
    }

    /// Sends the command stream to the sink and flushes it
    ///
    /// Returns the number of bytes delivered. The stream is kept when the sink fails, so the call can be repeated.
    pub fn print(&mut self) -> Result<usize, Error> {
        self.sink.write_all(&self.buffer)?;
        self.sink.flush()?;
        let sent = self.buffer.len();
        self.buffer.clear();
        Ok(sent)
    }

    /// [cut](Printer::cut) followed by [print](Printer::print)
    pub fn print_and_cut(&mut self) -> Result<usize, Error> {
        self.cut();
        self.print()
    }
}
