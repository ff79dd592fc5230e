// Interface rows as polled from the device and as decoded for classification

use std::fmt;

use crate::error::ClassifyError;

/// IF-MIB ifOperStatus / ifAdminStatus (RFC 2863). Wire codes 1-7; 0 is unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IfStatus {
    Up,
    Down,
    Testing,
    Unknown,
    Dormant,
    NotPresent,
    LowerLayerDown,
}

impl IfStatus {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(IfStatus::Up),
            2 => Some(IfStatus::Down),
            3 => Some(IfStatus::Testing),
            4 => Some(IfStatus::Unknown),
            5 => Some(IfStatus::Dormant),
            6 => Some(IfStatus::NotPresent),
            7 => Some(IfStatus::LowerLayerDown),
            _ => None,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            IfStatus::Up => 1,
            IfStatus::Down => 2,
            IfStatus::Testing => 3,
            IfStatus::Unknown => 4,
            IfStatus::Dormant => 5,
            IfStatus::NotPresent => 6,
            IfStatus::LowerLayerDown => 7,
        }
    }

    /// MIB enumeration label.
    pub fn as_str(&self) -> &'static str {
        match self {
            IfStatus::Up => "up",
            IfStatus::Down => "down",
            IfStatus::Testing => "testing",
            IfStatus::Unknown => "unknown",
            IfStatus::Dormant => "dormant",
            IfStatus::NotPresent => "notPresent",
            IfStatus::LowerLayerDown => "lowerLayerDown",
        }
    }
}

impl fmt::Display for IfStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operational role, taken from the tag that ends an interface description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Core,
    Cust,
    Access,
    Free,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Core, Role::Cust, Role::Access, Role::Free];

    pub fn tag(&self) -> &'static str {
        match self {
            Role::Core => "CORE",
            Role::Cust => "CUST",
            Role::Access => "ACCESS",
            Role::Free => "FREE",
        }
    }

    /// Case-sensitive, end-anchored match. No tag is a suffix of another, so at most one role fits.
    pub fn from_label(label: &str) -> Option<Role> {
        Self::ALL.into_iter().find(|role| label.ends_with(role.tag()))
    }
}

/// One row of the interface walk. `None` marks a column the agent did not return
/// or returned with an unexpected type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInterface {
    pub label: Option<String>,
    pub name: Option<String>,
    pub oper_status: Option<i64>,
    pub admin_status: Option<i64>,
}

impl RawInterface {
    pub fn new(label: &str, name: &str, oper_status: i64, admin_status: i64) -> Self {
        Self {
            label: Some(label.to_string()),
            name: Some(name.to_string()),
            oper_status: Some(oper_status),
            admin_status: Some(admin_status),
        }
    }
}

/// Decoded interface snapshot; the only input the classifier accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceRecord {
    pub label: String,
    pub name: String,
    pub oper_status: IfStatus,
    pub admin_status: IfStatus,
}

impl InterfaceRecord {
    pub fn new(label: &str, name: &str, oper_status: IfStatus, admin_status: IfStatus) -> Self {
        Self {
            label: label.to_string(),
            name: name.to_string(),
            oper_status,
            admin_status,
        }
    }

    pub fn role(&self) -> Option<Role> {
        Role::from_label(&self.label)
    }
}

impl TryFrom<RawInterface> for InterfaceRecord {
    type Error = ClassifyError;

    fn try_from(raw: RawInterface) -> Result<Self, Self::Error> {
        let name = raw
            .name
            .ok_or_else(|| ClassifyError::invalid("<unnamed>", "missing ifName"))?;
        let label = raw
            .label
            .ok_or_else(|| ClassifyError::invalid(&name, "missing ifAlias"))?;
        let oper_status = decode_status(&name, "ifOperStatus", raw.oper_status)?;
        let admin_status = decode_status(&name, "ifAdminStatus", raw.admin_status)?;
        Ok(Self {
            label,
            name,
            oper_status,
            admin_status,
        })
    }
}

fn decode_status(name: &str, column: &str, code: Option<i64>) -> Result<IfStatus, ClassifyError> {
    let code = code.ok_or_else(|| ClassifyError::invalid(name, format!("missing {column}")))?;
    IfStatus::from_code(code)
        .ok_or_else(|| ClassifyError::invalid(name, format!("{column} code {code} out of range 1-7")))
}
