//! Contract tests for UIButton and Run

use super::Host;
use builtins::dispatch_clicks;
use core_types::ErrorKind;

#[test]
fn test_run_dispatches_queued_clicks_in_order() {
    let mut host = Host::new(None);
    host.run(
        "def on_a() emit \"a\" end
         def on_b() emit \"b\" end
         GemApp(\"ui\")
         UIButton(\"A\", 10, 10, on_a)
         UIButton(\"B\", 10, 40, on_b)",
    )
    .unwrap();

    {
        let mut surface = host.surface.borrow_mut();
        surface.queue_click("B");
        surface.queue_click("A");
        surface.queue_click("B");
    }
    host.run("Run()").unwrap();
    assert_eq!(host.lines(), vec!["b", "a", "b"]);
    assert_eq!(host.surface.borrow().buttons().len(), 2);
}

#[test]
fn test_callbacks_can_use_surface() {
    let mut host = Host::new(None);
    host.run("def clicked() DrawText(\"hi\", 0, 0) end GemApp() UIButton(\"go\", 0, 0, clicked)")
        .unwrap();
    host.surface.borrow_mut().queue_click("go");

    let handled = dispatch_clicks(&mut host.interp, &host.surface).unwrap();
    assert_eq!(handled, 1);
    assert_eq!(host.surface.borrow().display_list().len(), 1);
}

#[test]
fn test_callback_error_propagates_from_run() {
    let mut host = Host::new(None);
    host.run("def boom() return missing end UIButton(\"x\", 0, 0, boom)").unwrap();
    host.surface.borrow_mut().queue_click("x");
    let err = host.run("Run()").unwrap_err();
    assert_eq!(err.kind, ErrorKind::NameError);
}

#[test]
fn test_run_with_no_clicks_returns() {
    let mut host = Host::new(None);
    host.run("Run()").unwrap();
    assert!(host.lines().is_empty());
}
