//! Grow-on-write GPU buffers.
//!
//! wgpu buffers are fixed-size once created, so exceeding capacity means
//! allocating a replacement and telling callers to rebind. [`DynamicBuffer`]
//! does the byte-level bookkeeping; [`TypedBuffer`] layers an item count on
//! top.

use wgpu::util::DeviceExt;

/// Floor for fresh allocations, in bytes.
const MIN_ALLOCATION: usize = 64;
/// Minimum step between capacities on reallocation, in bytes.
const GROWTH_SLACK: usize = 1024;

/// Byte buffer that reallocates on overflow and reports when it did.
///
/// Capacity only ever increases; a shrinking workload keeps the larger
/// allocation.
pub struct DynamicBuffer {
    buffer: wgpu::Buffer,
    /// Capacity in bytes.
    capacity: usize,
    /// Current data length in bytes.
    len: usize,
    usage: wgpu::BufferUsages,
    label: String,
}

impl DynamicBuffer {
    /// Empty buffer with at least `initial_capacity` bytes reserved.
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        initial_capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let capacity = initial_capacity.max(MIN_ALLOCATION);

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: capacity as u64,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            buffer,
            capacity,
            len: 0,
            usage,
            label: label.to_owned(),
        }
    }

    /// Buffer created directly from `data`.
    pub fn new_with_data<T: bytemuck::Pod>(
        device: &wgpu::Device,
        label: &str,
        data: &[T],
        usage: wgpu::BufferUsages,
    ) -> Self {
        let data_bytes: &[u8] = bytemuck::cast_slice(data);
        let capacity = data_bytes.len().max(MIN_ALLOCATION);

        let buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: data_bytes,
                usage: usage | wgpu::BufferUsages::COPY_DST,
            });

        Self {
            buffer,
            capacity,
            len: data_bytes.len(),
            usage,
            label: label.to_owned(),
        }
    }

    /// Upload `data`, reallocating first when it does not fit.
    ///
    /// Returns `true` on reallocation. The previous `wgpu::Buffer` is gone
    /// at that point, so bind groups and cached slices built on it must be
    /// recreated.
    pub fn write<T: bytemuck::Pod>(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        let data_bytes: &[u8] = bytemuck::cast_slice(data);
        let needed = data_bytes.len();

        let reallocated = if needed > self.capacity {
            // Double the requirement, or at least one slack step past the
            // old capacity.
            let new_capacity = (needed * 2).max(self.capacity + GROWTH_SLACK);

            self.buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&self.label),
                size: new_capacity as u64,
                usage: self.usage | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });

            self.capacity = new_capacity;
            true
        } else {
            false
        };

        if needed > 0 {
            queue.write_buffer(&self.buffer, 0, data_bytes);
        }
        self.len = needed;

        reallocated
    }

    /// The underlying wgpu buffer.
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Current data length in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the buffer currently holds no data.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocated capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Item-counted layer over [`DynamicBuffer`].
pub struct TypedBuffer<T> {
    inner: DynamicBuffer,
    count: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<T: bytemuck::Pod> TypedBuffer<T> {
    /// Empty buffer sized for `capacity` items.
    pub fn with_capacity(
        device: &wgpu::Device,
        label: &str,
        capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let initial_capacity = size_of::<T>() * capacity;
        Self {
            inner: DynamicBuffer::new(device, label, initial_capacity, usage),
            count: 0,
            _marker: std::marker::PhantomData,
        }
    }

    /// Buffer created directly from `data`.
    pub fn new_with_data(
        device: &wgpu::Device,
        label: &str,
        data: &[T],
        usage: wgpu::BufferUsages,
    ) -> Self {
        Self {
            inner: DynamicBuffer::new_with_data(device, label, data, usage),
            count: data.len(),
            _marker: std::marker::PhantomData,
        }
    }

    /// Upload `data`, reallocating first when it does not fit.
    ///
    /// Returns `true` on reallocation; see [`DynamicBuffer::write`].
    pub fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        self.count = data.len();
        self.inner.write(device, queue, data)
    }

    /// The underlying wgpu buffer.
    pub fn buffer(&self) -> &wgpu::Buffer {
        self.inner.buffer()
    }

    /// Number of items last written.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether the buffer currently holds no items.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Allocated capacity in items.
    pub fn capacity(&self) -> usize {
        self.inner.capacity() / size_of::<T>()
    }
}
