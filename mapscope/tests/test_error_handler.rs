use mapscope::domain::ErrorSource;
use mapscope::error_handler::ErrorHandler;

#[test]
fn test_global_is_singleton() {
    assert!(std::ptr::eq(ErrorHandler::global(), ErrorHandler::global()));
}

#[test]
fn test_panic_is_observed() {
    let handler = ErrorHandler::global();
    let before = handler.observed();

    let result = std::panic::catch_unwind(|| panic!("render loop exploded"));
    assert!(result.is_err());
    assert!(handler.observed() > before);
}

#[test]
fn test_categories_are_logged() {
    let handler = ErrorHandler::global();
    let before = handler.observed();
    for source in [ErrorSource::Map, ErrorSource::Layer, ErrorSource::Tile, ErrorSource::Interaction] {
        handler.report(source, "synthetic failure");
    }
    assert!(handler.observed() >= before + 4);
}

#[tokio::test]
async fn test_panicking_task_is_observed() {
    let handler = ErrorHandler::global();
    let before = handler.observed();

    let task = tokio::spawn(async {
        if true {
            panic!("tile worker died");
        }
        Ok::<(), String>(())
    });
    assert_eq!(handler.watch_task(task).await.unwrap(), None);
    assert!(handler.observed() > before);
}

#[tokio::test]
async fn test_cancelled_task_is_not_an_error() {
    let handler = ErrorHandler::global();
    let task = tokio::spawn(async {
        tokio::time::sleep(std::time::Duration::from_secs(60)).await;
        Ok::<(), String>(())
    });
    task.abort();
    assert_eq!(handler.watch_task(task).await.unwrap(), None);
}
