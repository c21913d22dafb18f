use crate::model::CoordinateResult;
use crate::provider::LocationError;

pub const NOT_AVAILABLE: &str = "N/A";

/// Text surfaces of the location screen.
pub trait LocationView: Send + Sync {
    fn set_latitude(&self, text: &str);
    fn set_longitude(&self, text: &str);
    /// Error/status line, empty after a successful fix.
    fn set_status(&self, text: &str);
    fn set_gps_status(&self, text: &str);
    fn set_stop_enabled(&self, enabled: bool);
    /// Called once after all surfaces of a render have been updated.
    fn commit(&self) {}
}

pub fn render(view: &dyn LocationView, result: &CoordinateResult) {
    match result {
        CoordinateResult::Fix(fix) => {
            view.set_latitude(&format!("Latitude: {}", fix.latitude));
            view.set_longitude(&format!("Longitude: {}", fix.longitude));
            view.set_status("");
        }
        CoordinateResult::Error(err) => render_error(view, err),
    }
    view.commit();
}

/// Catch-all for a poll whose call path failed before producing a result.
pub fn render_unexpected(view: &dyn LocationView) {
    render_error(view, &LocationError::UnexpectedUi);
    view.set_gps_status("GPS Status: Error");
    view.commit();
}

pub fn render_gps_status(view: &dyn LocationView, enabled: bool) {
    if enabled {
        view.set_gps_status("GPS Status: Enabled");
    } else {
        view.set_gps_status("GPS Status: Disabled");
    }
    view.commit();
}

fn render_error(view: &dyn LocationView, err: &LocationError) {
    view.set_latitude(&format!("Latitude: {}", NOT_AVAILABLE));
    view.set_longitude(&format!("Longitude: {}", NOT_AVAILABLE));
    view.set_status(&err.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Fix;
    use crate::testing::RecordingView;

    #[test]
    fn fix_clears_previous_error() {
        let view = RecordingView::default();
        render(&view, &LocationError::PermissionDenied.into());
        render(&view, &Fix::new(10.0, 20.0).into());
        let frames = view.frames();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].latitude, "Latitude: N/A");
        assert_eq!(frames[0].longitude, "Longitude: N/A");
        assert_eq!(frames[0].status, "Permission Denied");
        assert_eq!(frames[1].latitude, "Latitude: 10");
        assert_eq!(frames[1].longitude, "Longitude: 20");
        assert_eq!(frames[1].status, "");
    }

    #[test]
    fn error_overwrites_previous_fix() {
        let view = RecordingView::default();
        render(&view, &Fix::new(59.3293, 18.0686).into());
        render(&view, &LocationError::Unavailable.into());
        let last = view.frames().pop().unwrap();
        assert_eq!(last.latitude, "Latitude: N/A");
        assert_eq!(last.status, "Unable to get location");
    }

    #[test]
    fn unexpected_marks_gps_status() {
        let view = RecordingView::default();
        render_unexpected(&view);
        let last = view.frames().pop().unwrap();
        assert_eq!(last.status, "An unexpected error occurred.");
        assert_eq!(last.gps_status, "GPS Status: Error");
    }

    #[test]
    fn gps_status_text() {
        let view = RecordingView::default();
        render_gps_status(&view, true);
        render_gps_status(&view, false);
        let frames = view.frames();
        assert_eq!(frames[0].gps_status, "GPS Status: Enabled");
        assert_eq!(frames[1].gps_status, "GPS Status: Disabled");
    }
}
