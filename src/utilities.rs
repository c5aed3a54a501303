//! Internal helpers shared by the FFmpeg-facing modules.

use ffmpeg_next::frame::Video as VideoFrame;

/// Copy the first plane of a packed-pixel frame into a tightly packed buffer.
///
/// FFmpeg rows are often padded (`stride > width * bytes_per_pixel`); the
/// padding is dropped so the result fits `ImageBuffer::from_raw`.
pub(crate) fn frame_to_buffer(
    video_frame: &VideoFrame,
    width: u32,
    height: u32,
    bytes_per_pixel: usize,
) -> Vec<u8> {
    let stride = video_frame.stride(0);
    let row_len = (width as usize) * bytes_per_pixel;
    let data = video_frame.data(0);

    if stride == row_len {
        return data[..row_len * (height as usize)].to_vec();
    }

    data.chunks(stride)
        .take(height as usize)
        .flat_map(|row| &row[..row_len])
        .copied()
        .collect()
}

/// Copy a tightly packed buffer into the first plane of a frame, honouring
/// the frame's stride.
pub(crate) fn buffer_to_frame(
    buffer: &[u8],
    video_frame: &mut VideoFrame,
    width: u32,
    bytes_per_pixel: usize,
) {
    let stride = video_frame.stride(0);
    let row_len = (width as usize) * bytes_per_pixel;
    let plane = video_frame.data_mut(0);

    for (source_row, destination_row) in buffer.chunks(row_len).zip(plane.chunks_mut(stride)) {
        destination_row[..row_len].copy_from_slice(source_row);
    }
}
