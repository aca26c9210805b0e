use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::form_urlencoded;

use crate::{
    domain::{
        FormFields, ViewId, AIRWAY_BILL_NUMBER, BILL_OF_ENTRY_ID, PACKAGE_ID, STORING_ORDER_ID,
    },
    error::RequestBuildError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// Body sent with `POST storing-order/check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoringOrderCheckRequest {
    pub storing_order_id: String,
    pub airway_bill_number: String,
    pub bill_of_entry_id: String,
}

impl StoringOrderCheckRequest {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            storing_order_id: fields.get(STORING_ORDER_ID).to_string(),
            airway_bill_number: fields.get(AIRWAY_BILL_NUMBER).to_string(),
            bill_of_entry_id: fields.get(BILL_OF_ENTRY_ID).to_string(),
        }
    }
}

/// The fixed set of API calls the desk can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Package,
    StoringOrderCheck,
    Packages,
    PickSlips,
    StoringOrders,
}

impl Endpoint {
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::Package => "package",
            Endpoint::StoringOrderCheck => "storing_order_check",
            Endpoint::Packages => "packages",
            Endpoint::PickSlips => "pickslips",
            Endpoint::StoringOrders => "storing_orders",
        }
    }

    pub fn view(self) -> ViewId {
        match self {
            Endpoint::Package => ViewId::PackageLookup,
            Endpoint::StoringOrderCheck => ViewId::StoringOrderCheck,
            Endpoint::Packages | Endpoint::PickSlips | Endpoint::StoringOrders => {
                ViewId::ScanListing
            }
        }
    }

    pub fn method(self) -> HttpMethod {
        match self {
            Endpoint::StoringOrderCheck => HttpMethod::Post,
            _ => HttpMethod::Get,
        }
    }

    /// Path relative to the API base, with `{field}` placeholders.
    pub fn template(self) -> &'static str {
        match self {
            Endpoint::Package => "package?packageId={packageId}",
            Endpoint::StoringOrderCheck => "storing-order/check",
            Endpoint::Packages => "packages",
            Endpoint::PickSlips => "pickslips",
            Endpoint::StoringOrders => "storing-orders",
        }
    }

    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            Endpoint::Package => &[PACKAGE_ID],
            Endpoint::StoringOrderCheck => &[STORING_ORDER_ID, AIRWAY_BILL_NUMBER, BILL_OF_ENTRY_ID],
            Endpoint::Packages | Endpoint::PickSlips | Endpoint::StoringOrders => &[],
        }
    }

    pub fn action_label(self) -> &'static str {
        match self {
            Endpoint::Package => "Look up package",
            Endpoint::StoringOrderCheck => "Check storing order",
            Endpoint::Packages => "List packages",
            Endpoint::PickSlips => "List pick slips",
            Endpoint::StoringOrders => "List storing orders",
        }
    }

    /// JSON body for the endpoint, if it sends one.
    pub fn build_body(self, fields: &FormFields) -> Result<Option<Value>, RequestBuildError> {
        match self {
            Endpoint::StoringOrderCheck => {
                serde_json::to_value(StoringOrderCheckRequest::from_fields(fields))
                    .map(Some)
                    .map_err(|err| RequestBuildError::Body {
                        endpoint: self.name(),
                        reason: err.to_string(),
                    })
            }
            Endpoint::Package
            | Endpoint::Packages
            | Endpoint::PickSlips
            | Endpoint::StoringOrders => Ok(None),
        }
    }

    /// Endpoints triggered from `view`, in display order.
    pub fn for_view(view: ViewId) -> &'static [Endpoint] {
        match view {
            ViewId::PackageLookup => &[Endpoint::Package],
            ViewId::StoringOrderCheck => &[Endpoint::StoringOrderCheck],
            ViewId::ScanListing => &[
                Endpoint::Packages,
                Endpoint::PickSlips,
                Endpoint::StoringOrders,
            ],
        }
    }

    pub fn missing_fields(self, fields: &FormFields) -> Vec<&'static str> {
        self.required_fields()
            .iter()
            .copied()
            .filter(|name| !fields.is_filled(name))
            .collect()
    }

    pub fn build_request(self, fields: &FormFields) -> Result<ApiRequest, RequestBuildError> {
        let target = render_template(self.template(), fields)?;
        let body = self.build_body(fields)?;
        Ok(ApiRequest {
            endpoint: self,
            method: self.method(),
            target,
            body,
        })
    }
}

/// A fully resolved request, relative to the API base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub endpoint: Endpoint,
    pub method: HttpMethod,
    pub target: String,
    pub body: Option<Value>,
}

/// Substitutes `{name}` placeholders with form-urlencoded field values.
/// Fields absent from `fields` render as empty strings.
pub fn render_template(template: &str, fields: &FormFields) -> Result<String, RequestBuildError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut consumed = 0;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find('}') else {
            return Err(RequestBuildError::Unterminated {
                template: template.to_string(),
                offset: consumed + open,
            });
        };
        let name = &after_open[..close];
        if name.is_empty() {
            return Err(RequestBuildError::EmptyPlaceholder {
                template: template.to_string(),
                offset: consumed + open,
            });
        }
        out.extend(form_urlencoded::byte_serialize(fields.get(name).as_bytes()));

        let advance = open + 1 + close + 1;
        consumed += advance;
        rest = &rest[advance..];
    }
    out.push_str(rest);
    Ok(out)
}
