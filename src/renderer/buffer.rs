use wgpu::{Buffer, BufferUsages, Device, Queue};

/// GPU buffer rewritten every frame, reallocated when the data outgrows it.
pub struct StreamBuffer {
    label: &'static str,
    usage: BufferUsages,
    buffer: Buffer,
    capacity: u64,
}

impl StreamBuffer {
    const MIN_CAPACITY: u64 = 4096;

    pub fn new(device: &Device, label: &'static str, usage: BufferUsages) -> Self {
        let usage = usage | BufferUsages::COPY_DST;
        let buffer = Self::allocate(device, label, usage, Self::MIN_CAPACITY);
        Self {
            label,
            usage,
            buffer,
            capacity: Self::MIN_CAPACITY,
        }
    }

    /// Uploads `data`, growing to the next power of two if needed.
    pub fn write(&mut self, device: &Device, queue: &Queue, data: &[u8]) {
        let needed = data.len() as u64;
        if needed > self.capacity {
            self.capacity = needed.next_power_of_two();
            log::debug!("growing {} to {} bytes", self.label, self.capacity);
            self.buffer = Self::allocate(device, self.label, self.usage, self.capacity);
        }
        if !data.is_empty() {
            queue.write_buffer(&self.buffer, 0, data);
        }
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    fn allocate(device: &Device, label: &'static str, usage: BufferUsages, size: u64) -> Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage,
            mapped_at_creation: false,
        })
    }
}
