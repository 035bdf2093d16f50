use tracing::{error, info};

use super::host::{Alert, Host};
use crate::form::FormState;
use crate::services::{ImagePicker, Permission, PickResult};

/// How a banner pick settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    Selected,
    Cancelled,
    Denied,
    Failed,
}

/// Asks for media permission, launches the picker, and records the choice.
///
/// Cancelling leaves any earlier selection in place.
pub async fn pick_banner(
    form: &mut FormState,
    picker: &dyn ImagePicker,
    host: &mut impl Host,
) -> PickOutcome {
    match picker.request_permission().await {
        Ok(Permission::Granted) => {}
        Ok(Permission::Denied) => {
            host.alert(Alert::error(
                "Permission denied",
                "Access to your photos is required.",
            ));
            return PickOutcome::Denied;
        }
        Err(e) => {
            error!(error = %e, "banner permission request failed");
            host.alert(Alert::error("Error", "Could not open the image picker."));
            return PickOutcome::Failed;
        }
    }

    match picker.launch().await {
        Ok(PickResult::Selected(image)) => {
            info!(banner = %image.display_name(), "banner selected");
            form.set_banner_selection(Some(image));
            PickOutcome::Selected
        }
        Ok(PickResult::Cancelled) => PickOutcome::Cancelled,
        Err(e) => {
            error!(error = %e, "banner pick failed");
            host.alert(Alert::error("Error", "Could not use the selected image."));
            PickOutcome::Failed
        }
    }
}
