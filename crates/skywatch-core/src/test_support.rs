//! Host-test helpers: a minimal executor and a scripted I2C bus

use core::future::Future;
use core::pin::pin;
use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};
use std::vec::Vec;

const NOOP_VTABLE: RawWakerVTable = RawWakerVTable::new(
    |_| RawWaker::new(core::ptr::null(), &NOOP_VTABLE),
    |_| {},
    |_| {},
    |_| {},
);

/// Drives a future to completion on the current thread. The futures under
/// test only await immediately-ready bus operations, so a poll loop with a
/// no-op waker is all this needs.
pub fn block_on<F: Future>(future: F) -> F::Output {
    let waker = unsafe { Waker::from_raw(RawWaker::new(core::ptr::null(), &NOOP_VTABLE)) };
    let mut cx = Context::from_waker(&waker);
    let mut future = pin!(future);
    loop {
        if let Poll::Ready(output) = future.as_mut().poll(&mut cx) {
            return output;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockBusError;

impl embedded_hal::i2c::Error for MockBusError {
    fn kind(&self) -> embedded_hal::i2c::ErrorKind {
        embedded_hal::i2c::ErrorKind::Other
    }
}

/// One expected bus transaction: the bytes the driver must write, the bytes
/// handed back if it reads, and the outcome.
pub struct Expectation {
    write: Vec<u8>,
    read: Option<Vec<u8>>,
    result: Result<(), MockBusError>,
}

impl Expectation {
    pub fn write(bytes: &[u8]) -> Self {
        Self {
            write: bytes.to_vec(),
            read: None,
            result: Ok(()),
        }
    }

    pub fn write_read(write: &[u8], read: &[u8]) -> Self {
        Self {
            write: write.to_vec(),
            read: Some(read.to_vec()),
            result: Ok(()),
        }
    }

    pub fn failing(write: &[u8]) -> Self {
        Self {
            write: write.to_vec(),
            read: None,
            result: Err(MockBusError),
        }
    }
}

/// Scripted I2C bus: expectations are consumed in order, and every deviation
/// panics with the transaction index.
pub struct MockI2c {
    address: u8,
    expectations: Vec<Expectation>,
    position: usize,
}

impl MockI2c {
    pub fn new(address: u8, expectations: Vec<Expectation>) -> Self {
        Self {
            address,
            expectations,
            position: 0,
        }
    }

    pub fn assert_finished(&self) {
        assert_eq!(
            self.position,
            self.expectations.len(),
            "not every expected bus transaction was issued"
        );
    }
}

impl embedded_hal::i2c::ErrorType for MockI2c {
    type Error = MockBusError;
}

impl embedded_hal_async::i2c::I2c for MockI2c {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [embedded_hal::i2c::Operation<'_>],
    ) -> Result<(), Self::Error> {
        use embedded_hal::i2c::Operation;

        let index = self.position;
        self.position += 1;
        let expectation = self
            .expectations
            .get(index)
            .unwrap_or_else(|| panic!("unexpected bus transaction #{index}"));

        assert_eq!(address, self.address, "wrong device address in #{index}");

        let mut operations = operations.iter_mut();
        match operations.next() {
            Some(Operation::Write(bytes)) => {
                assert_eq!(*bytes, &expectation.write[..], "wrong write in #{index}")
            }
            other => panic!("transaction #{index} did not start with a write: {other:?}"),
        }

        // A failed transfer aborts the transaction before any read happens.
        expectation.result?;

        if let Some(read) = &expectation.read {
            match operations.next() {
                Some(Operation::Read(buf)) => {
                    assert_eq!(buf.len(), read.len(), "wrong read length in #{index}");
                    buf.copy_from_slice(read);
                }
                other => panic!("transaction #{index} expected a read: {other:?}"),
            }
        }
        assert!(
            operations.next().is_none(),
            "transaction #{index} had extra operations"
        );

        expectation.result
    }
}

/// Little-endian calibration block matching the manufacturer's datasheet
/// example coefficients.
pub fn datasheet_calibration_block() -> [u8; 24] {
    let fields: [u16; 12] = [
        27504,
        26435,
        (-1000i16) as u16,
        36477,
        (-10685i16) as u16,
        3024,
        2855,
        140,
        (-7i16) as u16,
        15500,
        (-14600i16) as u16,
        6000,
    ];
    let mut block = [0u8; 24];
    for (i, field) in fields.iter().enumerate() {
        block[i * 2..i * 2 + 2].copy_from_slice(&field.to_le_bytes());
    }
    block
}
