//! MFRC522 card reader over SPI.
//!
//! A card that has been read is put to sleep (HLTA) so it does not
//! answer the next REQA; it is only seen again after leaving and
//! re-entering the field.

use crate::error::Error;
use crate::rfid::{CredentialReader, Uid};
use embedded_hal::spi::SpiDevice;
use mfrc522::comm::blocking::spi::SpiInterface;
use mfrc522::{Initialized, Mfrc522};

pub struct CardReader<SPI: SpiDevice> {
    mfrc522: Mfrc522<SpiInterface<SPI>, Initialized>,
}

impl<SPI: SpiDevice> CardReader<SPI> {
    pub fn new(spi: SPI) -> Result<Self, Error> {
        let mut mfrc522 = Mfrc522::new(SpiInterface::new(spi))
            .init()
            .map_err(|_| Error::Reader)?;
        if let Ok(version) = mfrc522.version() {
            info!("MFRC522 version {:#x}", version);
        }
        Ok(Self { mfrc522 })
    }
}

impl<SPI: SpiDevice> CredentialReader for CardReader<SPI> {
    fn poll_new_credential(&mut self) -> Option<Uid> {
        let atqa = self.mfrc522.new_card_present().ok()?;
        let uid = match self.mfrc522.select(&atqa) {
            Ok(uid) => uid,
            Err(_) => {
                debug!("card select failed");
                return None;
            }
        };
        let _ = self.mfrc522.hlta();

        let mut out = Uid::new();
        out.extend_from_slice(uid.as_bytes()).ok()?;
        info!("card {=[u8]:x}", out.as_slice());
        Some(out)
    }
}
