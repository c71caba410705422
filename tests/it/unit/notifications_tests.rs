//! Unit tests for notifications module.

use moodboard::notifications::{Toast, ToastManager, ToastVariant};
use std::time::Duration;

#[test]
fn test_toast_creation() {
    let toast = Toast::success("Exported moodboard.png");
    assert_eq!(toast.message, "Exported moodboard.png");
    assert_eq!(toast.variant, ToastVariant::Success);
}

#[test]
fn test_toast_manager() {
    let mut manager = ToastManager::new();
    assert_eq!(manager.count(), 0);

    manager.push(Toast::success("Message 1"));
    manager.push(Toast::error("Message 2"));
    assert_eq!(manager.count(), 2);
    assert_eq!(manager.latest().map(|t| t.variant), Some(ToastVariant::Error));
}

#[test]
fn test_toast_not_immediately_expired() {
    let toast = Toast::success("Test").with_duration(Duration::from_secs(10));
    assert!(!toast.is_expired(), "Fresh toast should not be expired");
}

#[test]
fn test_variant_durations() {
    assert_eq!(ToastVariant::Success.default_duration(), Duration::from_secs(3));
    assert_eq!(ToastVariant::Info.default_duration(), Duration::from_secs(3));
    assert_eq!(ToastVariant::Warning.default_duration(), Duration::from_secs(4));
    assert_eq!(ToastVariant::Error.default_duration(), Duration::from_secs(5));
}

#[test]
fn test_variant_icons() {
    assert_eq!(ToastVariant::Success.icon(), "✓");
    assert_eq!(ToastVariant::Error.icon(), "✗");
    assert_eq!(ToastVariant::Info.icon(), "ℹ");
    assert_eq!(ToastVariant::Warning.icon(), "⚠");
}

#[test]
fn test_toast_manager_remove_expired() {
    let mut manager = ToastManager::new();
    manager.push(Toast::success("Toast 1"));
    manager.push(Toast::info("Toast 2").with_duration(Duration::ZERO));
    manager.push(Toast::warning("Toast 3"));

    assert!(manager.remove_expired());
    assert_eq!(manager.count(), 2);
    assert_eq!(manager.toasts()[1].message, "Toast 3");
    assert!(!manager.remove_expired());
}
