//! Contract tests for the GameLoop frame loop

use super::Host;
use builtins::DrawCommand;
use core_types::ErrorKind;

#[test]
fn test_game_loop_runs_until_frame_limit() {
    let mut host = Host::new(Some(3));
    host.run(
        "mem ticks = [] def update() push(ticks, len(ticks)) end GemApp() GameLoop(update) emit ticks",
    )
    .unwrap();
    assert_eq!(host.lines(), vec!["[0, 1, 2]"]);
    assert_eq!(host.surface.borrow().frames(), 3);
    assert!(!host.surface.borrow().is_running());
}

#[test]
fn test_each_tick_starts_with_empty_display_list() {
    let mut host = Host::new(Some(4));
    host.run("def update() DrawBox(0, 0, 1, 1) end InitWindow(10, 10) GameLoop(update)")
        .unwrap();
    let surface = host.surface.borrow();
    assert_eq!(surface.display_list().len(), 1);
    assert!(matches!(surface.display_list()[0], DrawCommand::Rect { .. }));
}

#[test]
fn test_close_window_stops_loop() {
    let mut host = Host::new(None);
    host.run(
        "mem state = {\"n\": 0}
         def update()
             mem state.n = state.n + 1
             if state.n == 5 then CloseWindow() end
         end
         InitWindow(10, 10)
         GameLoop(update)
         emit state.n",
    )
    .unwrap();
    assert_eq!(host.lines(), vec!["5"]);
    assert!(host.surface.borrow().window().is_none());
}

#[test]
fn test_update_error_stops_loop_and_propagates() {
    let mut host = Host::new(None);
    let err = host
        .run("def update() emit \"tick\" return 1 / 0 end GameLoop(update)")
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::ZeroDivisionError);
    assert_eq!(err.stack[0].function_name, "update");
    assert_eq!(host.lines(), vec!["tick"]);
    assert!(!host.surface.borrow().is_running());
}

#[test]
fn test_game_loop_requires_function() {
    let mut host = Host::new(Some(1));
    let err = host.run("GameLoop(3)").unwrap_err();
    assert_eq!(err.kind, ErrorKind::TypeError);
}
