use log::{debug, info};

use crate::tag::store::PageStore;

use super::payload::{ClearUiRequest, Command, DeleteUserAreaRequest, SimulateRequest, WriteRequest};
use super::sink::ICommandSink;

/// Builds the outbound payloads from a `PageStore` and hands them to a sink.
pub struct CommandDispatcher<S: ICommandSink> {
    sink: S,
}

impl<S: ICommandSink> CommandDispatcher<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Selected rows only.
    pub fn build_write(store: &PageStore) -> WriteRequest {
        WriteRequest {
            pages: store.selected(),
        }
    }

    /// Every row, selected or not.
    pub fn build_simulate(store: &PageStore) -> SimulateRequest {
        SimulateRequest {
            pages: store.snapshot(),
        }
    }

    /// Blank the store and ask the surface to follow.
    pub fn build_clear(store: &mut PageStore) -> ClearUiRequest {
        store.reset();
        ClearUiRequest
    }

    pub fn build_delete() -> DeleteUserAreaRequest {
        DeleteUserAreaRequest
    }

    /// Send the selected rows. Returns false, without sending, when nothing
    /// is selected.
    pub fn write(&mut self, store: &PageStore) -> bool {
        let request = Self::build_write(store);
        if request.is_empty() {
            debug!("write skipped: no rows selected");
            return false;
        }
        debug!("dispatching write of {} pages", request.pages.len());
        self.sink.submit(Command::Write(request));
        true
    }

    pub fn simulate(&mut self, store: &PageStore) {
        let request = Self::build_simulate(store);
        for line in request.render_lines() {
            info!("{}", line);
        }
        self.sink.submit(Command::Simulate(request));
    }

    pub fn clear(&mut self, store: &mut PageStore) {
        let request = Self::build_clear(store);
        debug!("store cleared, {} rows kept", store.len());
        self.sink.submit(Command::ClearUi(request));
    }

    /// Signal intent only. The caller must have confirmed with the user.
    pub fn delete_user_area(&mut self) {
        debug!("dispatching user area delete");
        self.sink.submit(Command::DeleteUserArea(Self::build_delete()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::command::sink::MockICommandSink;
    use crate::tag::command::testing::RecordingSink;
    use crate::tag::types::{PageId, ZERO_PAGE};
    use rstest::*;

    /// Ten staged pages, only the color page selected.
    #[fixture]
    fn store() -> PageStore {
        let mut store = PageStore::default();
        for page in 0x05..0x0E {
            store.set_bytes(page, [page as u8; 4]).unwrap();
        }
        store.set_bytes(0x20, [0x80, 0x00, 0x80, 0xFF]).unwrap();
        store.set_apply(0x20, true).unwrap();
        store
    }

    #[rstest]
    fn test_build_write_selected_only(store: PageStore) {
        assert_eq!(store.len(), 10);
        let request = CommandDispatcher::<RecordingSink>::build_write(&store);
        assert_eq!(
            request.pages.into_iter().collect::<Vec<_>>(),
            vec![(0x20, [0x80, 0x00, 0x80, 0xFF])]
        );
    }

    #[rstest]
    fn test_build_simulate_every_row(store: PageStore) {
        let request = CommandDispatcher::<RecordingSink>::build_simulate(&store);
        assert_eq!(request.pages.len(), 10);
        assert_eq!(request.pages[&0x05], [5; 4]);
    }

    #[rstest]
    fn test_build_clear() {
        let mut store = PageStore::default();
        for page in [0x05, 0x06, 0x20] {
            store.set_bytes(page, [0xAA; 4]).unwrap();
            store.set_apply(page, true).unwrap();
        }

        let request = CommandDispatcher::<RecordingSink>::build_clear(&mut store);

        assert_eq!(request, ClearUiRequest);
        let pages: Vec<PageId> = store.iter().map(|(p, _)| p).collect();
        assert_eq!(pages, vec![0x05, 0x06, 0x20]);
        for (_, row) in store.iter() {
            assert_eq!(row.bytes, ZERO_PAGE);
            assert!(!row.apply_selected);
        }
    }

    #[rstest]
    fn test_write_submits_selected_pages(store: PageStore) {
        let mut sink = MockICommandSink::new();
        sink.expect_submit()
            .withf(|command| {
                matches!(command, Command::Write(w) if w.pages.keys().copied().eq([0x20]))
            })
            .times(1)
            .return_const(());

        let mut dispatcher = CommandDispatcher::new(sink);
        assert!(dispatcher.write(&store));
    }

    #[rstest]
    fn test_empty_write_is_a_quiet_no_op(mut store: PageStore) {
        store.set_apply_all(false);
        let mut sink = MockICommandSink::new();
        sink.expect_submit().times(0);

        let mut dispatcher = CommandDispatcher::new(sink);
        assert!(!dispatcher.write(&store));
    }

    #[rstest]
    fn test_command_sequence(mut store: PageStore) {
        let mut dispatcher = CommandDispatcher::new(RecordingSink::new());

        dispatcher.simulate(&store);
        dispatcher.clear(&mut store);
        assert!(!dispatcher.write(&store));
        dispatcher.delete_user_area();

        let commands = dispatcher.sink_mut().take();
        assert_eq!(commands.len(), 3);
        assert!(matches!(&commands[0], Command::Simulate(s) if s.pages.len() == 10));
        assert_eq!(commands[1], Command::ClearUi(ClearUiRequest));
        assert_eq!(commands[2], Command::DeleteUserArea(DeleteUserAreaRequest));
        assert!(dispatcher.sink().commands.is_empty());
    }
}
