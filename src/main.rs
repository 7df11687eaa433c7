//! tunegate firmware entry point (nRF52840).
//!
//! Brings up the peripherals, spawns the asynchronous I/O tasks (IR
//! edges, command bus UART) and then runs the control loop on a fixed
//! period.  Everything the loop does lives in the library; this file
//! only wires hardware to it.
//!
//! The loop blocks on I²C and UART writes, so the IR receiver runs on an
//! interrupt executor that preempts it and the bus link receives into a
//! ring buffer.

#![no_std]
#![no_main]

use defmt::{info, unwrap, warn};
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_nrf::buffered_uarte::{self, BufferedUarte, BufferedUarteRx, BufferedUarteTx};
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pull};
use embassy_nrf::interrupt;
use embassy_nrf::interrupt::{InterruptExt, Priority};
use embassy_nrf::pwm::SimplePwm;
use embassy_nrf::spim::{self, Spim};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::uarte::{self, UarteTx};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Delay, Duration, Instant, Ticker, Timer};
use embedded_hal_bus::spi::ExclusiveDevice;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use tunegate::appliance::Appliance;
use tunegate::audio::player::DfPlayer;
use tunegate::bus::uart::{self, BusResult, ChannelBus, OutLine, CALL_QUEUE, OUT_QUEUE};
use tunegate::config::{
    AUTHORIZED_UID, BUS_BAUD, DFPLAYER_BAUD, LOOP_PERIOD_MS, SPLASH_MS, VOL_DEFAULT,
};
use tunegate::feedback::buzzer::Buzzer;
use tunegate::remote::receiver::{self, ChannelRemote, TOKEN_QUEUE};
use tunegate::remote::CommandToken;
use tunegate::rfid::reader::CardReader;
use tunegate::session::SessionContext;
use tunegate::ui::display::{self, OledScreen};

bind_interrupts!(struct Irqs {
    UARTE0 => uarte::InterruptHandler<peripherals::UARTE0>;
    UARTE1 => buffered_uarte::InterruptHandler<peripherals::UARTE1>;
    SPI2 => spim::InterruptHandler<peripherals::SPI2>;
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

static TOKENS: Channel<CriticalSectionRawMutex, CommandToken, TOKEN_QUEUE> = Channel::new();
static CALLS: Channel<CriticalSectionRawMutex, BusResult, CALL_QUEUE> = Channel::new();
static OUT: Channel<CriticalSectionRawMutex, OutLine, OUT_QUEUE> = Channel::new();

static BUS_RX_BUF: StaticCell<[u8; uart::RX_BUFFER]> = StaticCell::new();
static BUS_TX_BUF: StaticCell<[u8; uart::TX_BUFFER]> = StaticCell::new();

/// Runs the IR receiver above the control loop's priority.
static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn EGU1_SWI1() {
    EXECUTOR_HIGH.on_interrupt()
}

#[embassy_executor::task]
async fn ir_task(pin: Input<'static>) -> ! {
    receiver::ir_task(pin, TOKENS.sender()).await
}

#[embassy_executor::task]
async fn bus_reader_task(
    rx: BufferedUarteRx<'static, peripherals::UARTE1, peripherals::TIMER0>,
) -> ! {
    uart::reader_task(rx, CALLS.sender()).await
}

#[embassy_executor::task]
async fn bus_writer_task(tx: BufferedUarteTx<'static, peripherals::UARTE1>) -> ! {
    uart::writer_task(tx, OUT.receiver()).await
}

fn uart_config(baudrate: uarte::Baudrate) -> uarte::Config {
    let mut config = uarte::Config::default();
    config.parity = uarte::Parity::EXCLUDED;
    config.baudrate = baudrate;
    config
}

fn baudrate(baud: u32) -> uarte::Baudrate {
    match baud {
        9_600 => uarte::Baudrate::BAUD9600,
        _ => uarte::Baudrate::BAUD115200,
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("tunegate starting");

    // ── Display ──────────────────────────────────────────────
    let mut i2c_config = twim::Config::default();
    i2c_config.frequency = twim::Frequency::K400;
    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, i2c_config);
    let oled = unwrap!(display::init(i2c));

    // DFPlayer needs its boot time before it accepts commands.
    Timer::after(Duration::from_millis(SPLASH_MS)).await;

    // ── Card reader ──────────────────────────────────────────
    let mut spi_config = spim::Config::default();
    spi_config.frequency = spim::Frequency::M1;
    let spim = Spim::new(p.SPI2, Irqs, p.P0_14, p.P0_15, p.P0_13, spi_config);
    let cs = Output::new(p.P0_04, Level::High, OutputDrive::Standard);
    let _rfid_rst = Output::new(p.P0_05, Level::High, OutputDrive::Standard);
    let Ok(spi) = ExclusiveDevice::new(spim, cs, Delay) else {
        defmt::panic!("SPI chip select setup failed");
    };
    let reader = unwrap!(CardReader::new(spi));

    // ── Audio ────────────────────────────────────────────────
    let df_tx = UarteTx::new(p.UARTE0, Irqs, p.P0_25, uart_config(baudrate(DFPLAYER_BAUD)));
    let busy = Input::new(p.P0_28, Pull::Up);
    let mut player = DfPlayer::new(df_tx, busy);
    if let Err(e) = player.boot(VOL_DEFAULT) {
        warn!("DFPlayer boot failed: {}", e);
    }

    // ── Command bus ──────────────────────────────────────────
    let bus_uart = BufferedUarte::new(
        p.UARTE1,
        p.TIMER0,
        p.PPI_CH0,
        p.PPI_CH1,
        p.PPI_GROUP0,
        Irqs,
        p.P0_08,
        p.P0_06,
        uart_config(baudrate(BUS_BAUD)),
        BUS_RX_BUF.init([0; uart::RX_BUFFER]),
        BUS_TX_BUF.init([0; uart::TX_BUFFER]),
    );
    let (bus_rx, bus_tx) = bus_uart.split();
    unwrap!(spawner.spawn(bus_reader_task(bus_rx)));
    unwrap!(spawner.spawn(bus_writer_task(bus_tx)));

    // ── IR remote ────────────────────────────────────────────
    let ir_pin = Input::new(p.P0_03, Pull::Up);
    interrupt::EGU1_SWI1.set_priority(Priority::P6);
    let high_spawner = EXECUTOR_HIGH.start(interrupt::EGU1_SWI1);
    unwrap!(high_spawner.spawn(ir_task(ir_pin)));

    // ── Buzzer ───────────────────────────────────────────────
    let buzzer = Buzzer::new(SimplePwm::new_1ch(p.PWM0, p.P0_31));

    let mut appliance = Appliance::new(
        SessionContext::new(AUTHORIZED_UID),
        reader,
        ChannelRemote::new(TOKENS.receiver()),
        player,
        ChannelBus::new(CALLS.receiver(), OUT.sender()),
        buzzer,
        OledScreen::new(oled),
    );
    info!("ready - scan card to unlock");

    let mut ticker = Ticker::every(Duration::from_millis(LOOP_PERIOD_MS));
    loop {
        appliance.step(Instant::now().as_millis());
        ticker.next().await;
    }
}
