mod common;

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::io::{self, BufWriter, Write};
    use std::rc::Rc;

    use bytestream_core::prelude::*;

    use super::common::{init_logging, pattern, TrackedReader, TrackedWriter};

    #[test]
    fn reads_three_then_five_then_eos_and_closes_both() {
        init_logging();
        let a = TrackedReader::new(vec![1, 2, 3]);
        let b = TrackedReader::new(vec![4, 5, 6, 7, 8]);
        let (a_closes, b_closes) = (a.close_counter(), b.close_counter());

        let mut seq = SequentialReader::concat(vec![a, b]);
        let mut got = Vec::new();
        for _ in 0..8 {
            got.push(seq.read_u8().unwrap());
        }
        assert_eq!(got, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert!(seq.read_u8().unwrap_err().is_end_of_stream());
        assert!(seq.read_u8().unwrap_err().is_end_of_stream());
        assert!(seq.is_exhausted());

        seq.close().unwrap();
        assert!(a_closes.get() >= 1);
        assert!(b_closes.get() >= 1);
    }

    #[test]
    fn leave_open_policy_still_closes_last_stream() {
        let streams = vec![
            TrackedReader::new(pattern(2)),
            TrackedReader::new(pattern(2)),
            TrackedReader::new(pattern(2)),
        ];
        let mut seq = SequentialReader::new(streams, StandardPolicy::LeaveOpen);
        assert_eq!(seq.read_u8().unwrap(), 0);
        seq.close().unwrap();

        let mut streams = seq.into_inner();
        assert!(!streams[0].is_closed());
        assert!(!streams[1].is_closed());
        assert!(streams[2].is_closed());

        // Earlier members remain usable directly.
        assert_eq!(streams[0].read_u8().unwrap(), 1);
        assert_eq!(streams[1].read_u8().unwrap(), 0);
    }

    #[test]
    fn transitions_invoke_policy_once_per_member() {
        let calls = Rc::new(Cell::new(0u32));
        let seen = Rc::clone(&calls);
        let policy = move |_: &mut TrackedReader| -> StreamResult<bool> {
            seen.set(seen.get() + 1);
            Ok(false)
        };
        let streams = vec![TrackedReader::new(pattern(1)), TrackedReader::new(pattern(1))];
        let mut seq = SequentialReader::new(streams, policy);

        assert_eq!(seq.cursor(), Cursor::Active(0));
        seq.read_u8().unwrap();
        seq.read_u8().unwrap();
        assert_eq!(seq.cursor(), Cursor::Active(1));
        assert_eq!(calls.get(), 1);

        assert!(seq.read_u8().unwrap_err().is_end_of_stream());
        assert_eq!(seq.cursor(), Cursor::Exhausted);
        assert_eq!(calls.get(), 2);

        // Already exhausted: close runs no further policy, only the terminal close.
        seq.close().unwrap();
        seq.close().unwrap();
        assert_eq!(calls.get(), 2);
        assert_eq!(seq.streams()[1].close_count(), 1);
        assert_eq!(seq.streams()[0].close_count(), 0);
    }

    #[test]
    fn close_before_exhaustion_runs_policy_on_every_member() {
        let calls = Rc::new(Cell::new(0u32));
        let seen = Rc::clone(&calls);
        let policy = move |_: &mut TrackedReader| -> StreamResult<bool> {
            seen.set(seen.get() + 1);
            Ok(true)
        };
        let streams: Vec<TrackedReader> = (0..4).map(|_| TrackedReader::new(pattern(3))).collect();
        let mut seq = SequentialReader::new(streams, policy);
        seq.close().unwrap();
        assert_eq!(calls.get(), 4);
        assert!(seq.is_exhausted());
        assert!(seq.read_u8().unwrap_err().is_end_of_stream());
    }

    #[test]
    fn empty_sequence_is_exhausted_immediately() {
        let mut seq = SequentialReader::concat(Vec::<TrackedReader>::new());
        assert!(seq.is_exhausted());
        assert!(seq.read_u8().unwrap_err().is_end_of_stream());
        seq.close().unwrap();
    }

    #[test]
    fn fill_spans_members() {
        let mut seq = SequentialReader::concat(vec![
            ArrayReader::new(vec![1u8, 2, 3]),
            ArrayReader::new(vec![4u8, 5, 6, 7, 8]),
        ]);
        let mut region = Region::allocate(6, Placement::Indirect);
        seq.fill_buffer(&mut region).unwrap();
        assert_eq!(region.filled(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(seq.cursor(), Cursor::Active(1));

        region.clear();
        seq.fill_buffer(&mut region).unwrap();
        assert_eq!(region.filled(), &[7, 8]);
        assert!(seq.is_exhausted());
    }

    #[test]
    fn multi_byte_values_straddle_member_boundaries() {
        let mut seq = SequentialReader::concat(vec![
            ArrayReader::new(vec![0x01u8]),
            ArrayReader::new(vec![0x02u8, 0x03]),
            ArrayReader::new(vec![0x04u8]),
        ]);
        assert_eq!(seq.read_i32().unwrap(), 0x0102_0304);
    }

    #[test]
    fn policy_error_propagates_but_cursor_moves_on() {
        let policy = |_: &mut TrackedReader| -> StreamResult<bool> {
            Err(StreamError::InvalidData("refused".into()))
        };
        let mut seq =
            SequentialReader::new(vec![TrackedReader::new(vec![]), TrackedReader::new(vec![9])], policy);
        assert!(matches!(seq.read_u8(), Err(StreamError::InvalidData(_))));
        assert_eq!(seq.read_u8().unwrap(), 9);
    }

    #[test]
    fn buffering_folds_member_preferences() {
        let members: Vec<Box<dyn Readable>> = vec![
            Box::new(TrackedReader::new(pattern(1))),
            Box::new(IoReader::new(std::io::Cursor::new(pattern(1)))),
        ];
        let seq = SequentialReader::concat(members);
        assert_eq!(seq.buffering(), Buffering::PreferAny);

        let members: Vec<Box<dyn Readable>> = vec![
            Box::new(IoReader::new(std::io::Cursor::new(pattern(1)))),
            Box::new(ArrayReader::new(pattern(1))),
        ];
        let seq = SequentialReader::concat(members);
        assert_eq!(seq.buffering(), Buffering::PreferIndirect);
    }

    #[test]
    fn writer_fills_members_in_order() {
        let mut seq = SequentialWriter::concat(vec![
            ArrayWriter::new(vec![0u8; 2]),
            ArrayWriter::new(vec![0u8; 3]),
        ]);
        seq.write_bytes(&[1, 2, 3, 4, 5]).unwrap();
        assert!(seq.write_u8(6).unwrap_err().is_end_of_stream());
        assert!(seq.is_exhausted());

        let members = seq.into_inner();
        assert_eq!(members[0].written(), &[1, 2]);
        assert_eq!(members[1].written(), &[3, 4, 5]);
    }

    #[test]
    fn writer_single_bytes_advance_on_full_member() {
        let mut seq = SequentialWriter::new(
            vec![TrackedWriter::with_capacity(1), TrackedWriter::with_capacity(4)],
            StandardPolicy::LeaveOpen,
        );
        seq.write_u16(0xAABB).unwrap();
        seq.write_u8(0xCC).unwrap();
        seq.close().unwrap();

        let members = seq.into_inner();
        assert_eq!(members[0].written(), &[0xAA]);
        assert_eq!(members[1].written(), &[0xBB, 0xCC]);
        assert_eq!(members[0].close_count(), 0);
        assert_eq!(members[1].close_count(), 1);
    }

    #[test]
    fn writer_bulk_past_total_capacity_is_end_of_stream() {
        let mut seq = SequentialWriter::concat(vec![ArrayWriter::new([0u8; 1]), ArrayWriter::new([0u8; 1])]);
        assert!(seq.write_bytes(&[1, 2, 3]).unwrap_err().is_end_of_stream());
        let members = seq.into_inner();
        assert_eq!(members[0].written(), &[1]);
        assert_eq!(members[1].written(), &[2]);
    }

    /// `io::Write` sink whose contents stay observable after it is moved into a writer.
    #[derive(Clone, Default)]
    struct SharedSink(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn left_writer_members_are_flushed_before_the_policy_runs() {
        let (first, second) = (SharedSink::default(), SharedSink::default());
        let members = vec![
            IoWriter::new(BufWriter::new(first.clone())).bounded(2),
            IoWriter::new(BufWriter::new(second.clone())).bounded(2),
        ];
        let mut seq = SequentialWriter::new(members, StandardPolicy::LeaveOpen);

        seq.write_bytes(&[1, 2, 3]).unwrap();
        assert_eq!(seq.cursor(), Cursor::Active(1));
        assert_eq!(*first.0.borrow(), vec![1, 2]);
        assert!(second.0.borrow().is_empty());

        seq.flush().unwrap();
        assert_eq!(*second.0.borrow(), vec![3]);

        // LeaveOpen: the first member is still writable directly.
        let mut members = seq.into_inner();
        members[0].get_mut().write_u8(9).unwrap();
        members[0].flush().unwrap();
        assert_eq!(*first.0.borrow(), vec![1, 2, 9]);
    }

    #[test]
    fn close_flushes_members_under_leave_open() {
        let sink = SharedSink::default();
        let mut seq = SequentialWriter::new(
            vec![IoWriter::new(BufWriter::new(sink.clone())), IoWriter::new(BufWriter::new(sink.clone()))],
            StandardPolicy::LeaveOpen,
        );
        seq.write_bytes(&[7, 8]).unwrap();
        assert!(sink.0.borrow().is_empty());
        seq.close().unwrap();
        assert_eq!(*sink.0.borrow(), vec![7, 8]);
    }

    #[test]
    fn reader_member_fault_propagates_and_cursor_stays() {
        let mut broken = ArrayReader::new(vec![2u8]);
        broken.close().unwrap();
        let mut seq = SequentialReader::new(
            vec![ArrayReader::new(vec![1u8]), broken, ArrayReader::new(vec![3u8])],
            StandardPolicy::LeaveOpen,
        );

        assert_eq!(seq.read_u8().unwrap(), 1);
        assert!(seq.read_u8().unwrap_err().is_closed());
        assert_eq!(seq.cursor(), Cursor::Active(1));
        assert!(seq.read_u8().unwrap_err().is_closed());
        assert_eq!(seq.cursor(), Cursor::Active(1));

        let mut region = Region::allocate(4, Placement::Indirect);
        assert!(seq.fill_buffer(&mut region).unwrap_err().is_closed());
        assert_eq!(seq.cursor(), Cursor::Active(1));
        assert_eq!(seq.streams()[2].available(), 1);
    }

    #[test]
    fn writer_member_fault_propagates_and_cursor_stays() {
        let mut broken = TrackedWriter::unbounded();
        broken.close().unwrap();
        let mut seq = SequentialWriter::new(
            vec![TrackedWriter::with_capacity(1), broken, TrackedWriter::unbounded()],
            StandardPolicy::LeaveOpen,
        );

        seq.write_u8(1).unwrap();
        assert!(seq.write_u8(2).unwrap_err().is_closed());
        assert_eq!(seq.cursor(), Cursor::Active(1));
        assert!(seq.write_bytes(&[3, 4]).unwrap_err().is_closed());
        assert_eq!(seq.cursor(), Cursor::Active(1));

        let members = seq.into_inner();
        assert_eq!(members[0].written(), &[1]);
        assert!(members[2].written().is_empty());
    }
}
