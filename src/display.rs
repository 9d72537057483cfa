//! ST7789 LCD, 170×320 panel driven in landscape over write-only SPI with DMA.

use embedded_hal_bus::spi::ExclusiveDevice;
use esp_hal::{
    Async,
    delay::Delay,
    dma::{
        DmaRxBuf,
        DmaTxBuf,
    },
    dma_buffers,
    gpio::{
        Level,
        Output,
        OutputConfig,
    },
    spi::master::{
        Config,
        Spi,
        SpiDmaBus,
    },
    time::Rate,
};
use mipidsi::{
    Builder,
    models::ST7789,
    options::{
        ColorInversion,
        Orientation,
        Rotation,
    },
};
use static_cell::StaticCell;

use crate::DisplayResources;

/// Panel size in its native portrait orientation.
const PANEL_WIDTH: u16 = 170;
const PANEL_HEIGHT: u16 = 320;

/// The 170 visible columns sit in the middle of the controller's 240.
const COLUMN_OFFSET: u16 = 35;

const SPI_FREQUENCY_MHZ: u32 = 40;
const DMA_BUFFER_SIZE: usize = 16 * 1024;

type SpiInterface<'a> = mipidsi::interface::SpiInterface<
    'a,
    ExclusiveDevice<SpiDmaBus<'a, Async>, Output<'a>, Delay>,
    Output<'a>,
>;

/// The T-Embed LCD, 320×170 in landscape, ready for `embedded-graphics`.
pub type Display<'a> = mipidsi::Display<SpiInterface<'a>, ST7789, Output<'a>>;

impl From<DisplayResources<'static>> for Display<'static> {
    /// Bring up the panel. Needs the [`PowerRail`](crate::PowerRail) on.
    ///
    /// Any failure here leaves the board without a screen, so it panics.
    fn from(res: DisplayResources<'static>) -> Self {
        let (rx_buffer, rx_descriptors, tx_buffer, tx_descriptors) = dma_buffers!(DMA_BUFFER_SIZE);
        let dma_rx_buf = DmaRxBuf::new(rx_descriptors, rx_buffer).expect("LCD DMA rx buffer");
        let dma_tx_buf = DmaTxBuf::new(tx_descriptors, tx_buffer).expect("LCD DMA tx buffer");

        let spi = Spi::new(
            res.spi,
            Config::default().with_frequency(Rate::from_mhz(SPI_FREQUENCY_MHZ)),
        )
        .expect("LCD SPI config")
        .with_sck(res.sck)
        .with_mosi(res.mosi)
        .with_dma(res.dma)
        .with_buffers(dma_rx_buf, dma_tx_buf)
        .into_async();

        let mut delay = Delay::new();
        let cs = Output::new(res.cs, Level::High, OutputConfig::default());
        let spi_device = ExclusiveDevice::new(spi, cs, delay).expect("LCD chip select");

        let dc = Output::new(res.dc, Level::Low, OutputConfig::default());
        let rst = Output::new(res.rst, Level::High, OutputConfig::default());

        static LINE_BUFFER: StaticCell<[u8; 512]> = StaticCell::new();
        let buffer = LINE_BUFFER.init([0; 512]);
        let interface = mipidsi::interface::SpiInterface::new(spi_device, dc, buffer);

        let display = Builder::new(ST7789, interface)
            .reset_pin(rst)
            .display_size(PANEL_WIDTH, PANEL_HEIGHT)
            .display_offset(COLUMN_OFFSET, 0)
            .invert_colors(ColorInversion::Inverted)
            .orientation(Orientation::new().rotate(Rotation::Deg90))
            .init(&mut delay)
            .expect("ST7789 init");

        defmt::info!("LCD ready");
        display
    }
}
