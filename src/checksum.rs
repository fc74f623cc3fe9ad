/// Calculates the 8-bit XOR checksum appended to payload-bearing RPLIDAR requests.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Checksum {
    current: u8,
}

impl Checksum {
    /// Creates a new `Checksum` instance, initialized to 0.
    #[inline]
    pub fn new() -> Checksum {
        Checksum { current: 0 }
    }

    /// Includes a slice of bytes in the checksum calculation, left to right.
    #[inline]
    pub fn push_slice(&mut self, data: &[u8]) {
        for d in data {
            self.current ^= d;
        }
    }

    /// Returns the calculated checksum value.
    #[inline]
    pub fn checksum(&self) -> u8 {
        self.current
    }
}

/// XOR-folds `data` into a single byte. An empty slice yields 0.
pub fn checksum(data: &[u8]) -> u8 {
    let mut acc = Checksum::new();
    acc.push_slice(data);
    acc.checksum()
}
