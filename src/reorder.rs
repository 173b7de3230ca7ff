//! Reordering between frame-major and lane-major layouts for batches of frames

use crate::Error;

/// Reorderer between frame-major and lane-major layouts for a batch of equal-length frames
///
/// In the frame-major layout each frame's bits are contiguous; in the lane-major layout all
/// frames' bits at a given position are contiguous, so that a lockstep decoder can step through
/// positions while keeping one slot per frame side by side.
#[derive(Clone, Eq, PartialEq, Debug, Copy)]
pub struct FrameReorderer {
    /// Number of frames in a batch
    pub(crate) num_frames: usize,
    /// Number of bits per frame
    pub(crate) frame_len: usize,
}

impl FrameReorderer {
    /// Returns reorderer for a given batch shape.
    ///
    /// # Parameters
    ///
    /// - `num_frames`: Number of frames in a batch. Must be a positive integer.
    ///
    /// - `frame_len`: Number of bits per frame. Must be a positive integer.
    ///
    /// # Errors
    ///
    /// Returns an error if `num_frames` or `frame_len` is `0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bch::FrameReorderer;
    ///
    /// let reorderer = FrameReorderer::new(2, 3)?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(num_frames: usize, frame_len: usize) -> Result<Self, Error> {
        if num_frames == 0 {
            return Err(Error::InvalidInput(
                "Number of frames must be a positive integer".to_string(),
            ));
        }
        if frame_len == 0 {
            return Err(Error::InvalidInput(
                "Frame length must be a positive integer".to_string(),
            ));
        }
        Ok(Self {
            num_frames,
            frame_len,
        })
    }

    /// Generates lane-major sequence given frame-major sequence.
    ///
    /// # Parameters
    ///
    /// - `frames`: Frame-major sequence, with each frame's bits contiguous.
    ///
    /// - `lanes`: Buffer for lane-major sequence (any pre-existing contents will be cleared).
    ///
    /// # Errors
    ///
    /// Returns an error if `frames.len()` is not equal to `self.num_frames * self.frame_len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bch::FrameReorderer;
    ///
    /// let reorderer = FrameReorderer::new(2, 3)?;
    /// let frames = ['a', 'b', 'c', 'd', 'e', 'f'];
    /// let mut lanes = Vec::new();
    /// reorderer.reorder(&frames, &mut lanes)?;
    /// assert_eq!(lanes, ['a', 'd', 'b', 'e', 'c', 'f']);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn reorder<T: Copy>(&self, frames: &[T], lanes: &mut Vec<T>) -> Result<(), Error> {
        self.check_sequence_length(frames.len())?;
        lanes.clear();
        for position in 0 .. self.frame_len {
            for frame in 0 .. self.num_frames {
                lanes.push(frames[frame * self.frame_len + position]);
            }
        }
        Ok(())
    }

    /// Generates frame-major sequence given lane-major sequence.
    ///
    /// # Parameters
    ///
    /// - `lanes`: Lane-major sequence, with all frames' bits at a given position contiguous.
    ///
    /// - `frames`: Buffer for frame-major sequence (any pre-existing contents will be cleared).
    ///
    /// # Errors
    ///
    /// Returns an error if `lanes.len()` is not equal to `self.num_frames * self.frame_len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bch::FrameReorderer;
    ///
    /// let reorderer = FrameReorderer::new(2, 3)?;
    /// let lanes = ['a', 'd', 'b', 'e', 'c', 'f'];
    /// let mut frames = Vec::new();
    /// reorderer.restore(&lanes, &mut frames)?;
    /// assert_eq!(frames, ['a', 'b', 'c', 'd', 'e', 'f']);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn restore<T: Copy>(&self, lanes: &[T], frames: &mut Vec<T>) -> Result<(), Error> {
        self.check_sequence_length(lanes.len())?;
        frames.clear();
        for frame in 0 .. self.num_frames {
            for position in 0 .. self.frame_len {
                frames.push(lanes[position * self.num_frames + frame]);
            }
        }
        Ok(())
    }

    /// Checks validity of input sequence length.
    fn check_sequence_length(&self, sequence_len: usize) -> Result<(), Error> {
        if sequence_len != self.num_frames * self.frame_len {
            return Err(Error::InvalidInput(format!(
                "Invalid sequence length (expected {}, found {sequence_len})",
                self.num_frames * self.frame_len,
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests_of_frame_reorderer {
    use super::*;

    #[test]
    fn test_new() {
        // Invalid input
        assert!(FrameReorderer::new(0, 3).is_err());
        assert!(FrameReorderer::new(2, 0).is_err());
        // Valid input
        let reorderer = FrameReorderer::new(2, 3).unwrap();
        assert_eq!(reorderer.num_frames, 2);
        assert_eq!(reorderer.frame_len, 3);
    }

    #[test]
    fn test_reorder() {
        let reorderer = FrameReorderer::new(3, 4).unwrap();
        let mut lanes = Vec::new();
        // Invalid input
        let frames = ['a', 'b', 'c', 'd', 'e'];
        assert!(reorderer.reorder(&frames, &mut lanes).is_err());
        // Valid input
        let frames = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l'];
        for _ in 0 .. 2 {
            reorderer.reorder(&frames, &mut lanes).unwrap();
            assert_eq!(
                lanes,
                ['a', 'e', 'i', 'b', 'f', 'j', 'c', 'g', 'k', 'd', 'h', 'l']
            );
        }
    }

    #[test]
    fn test_restore() {
        let reorderer = FrameReorderer::new(3, 4).unwrap();
        let mut frames = Vec::new();
        // Invalid input
        let lanes = ['a', 'e', 'i', 'b', 'f', 'j', 'c', 'g', 'k', 'd', 'h'];
        assert!(reorderer.restore(&lanes, &mut frames).is_err());
        // Valid input
        let lanes = ['a', 'e', 'i', 'b', 'f', 'j', 'c', 'g', 'k', 'd', 'h', 'l'];
        for _ in 0 .. 2 {
            reorderer.restore(&lanes, &mut frames).unwrap();
            assert_eq!(
                frames,
                ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l']
            );
        }
    }

    #[test]
    fn test_reorder_then_restore() {
        let reorderer = FrameReorderer::new(4, 7).unwrap();
        let original: Vec<usize> = (0 .. 28).collect();
        let mut lanes = Vec::new();
        let mut frames = Vec::new();
        reorderer.reorder(&original, &mut lanes).unwrap();
        reorderer.restore(&lanes, &mut frames).unwrap();
        assert_eq!(frames, original);
    }
}
