#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

impl NavKey {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowDown" => Some(Self::ArrowDown),
            "ArrowUp" => Some(Self::ArrowUp),
            "Enter" => Some(Self::Enter),
            "Escape" => Some(Self::Escape),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Closed,
    Open(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Ignored,
    Moved(usize),
    Confirm(usize),
    Cancelled,
}

impl SelectionState {
    pub fn index(self) -> usize {
        match self {
            Self::Closed => 0,
            Self::Open(index) => index,
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, Self::Open(_))
    }

    pub fn sync(&mut self, visible: bool, len: usize, list_changed: bool) {
        *self = match *self {
            _ if !visible || len == 0 => Self::Closed,
            Self::Closed => Self::Open(0),
            Self::Open(_) if list_changed => Self::Open(0),
            Self::Open(index) => Self::Open(index.min(len - 1)),
        };
    }

    pub fn on_key(&mut self, key: NavKey, len: usize) -> Transition {
        let Self::Open(index) = *self else {
            return Transition::Ignored;
        };
        if len == 0 {
            *self = Self::Closed;
            return Transition::Ignored;
        }

        match key {
            NavKey::ArrowDown => {
                let next = (index + 1) % len;
                *self = Self::Open(next);
                Transition::Moved(next)
            }
            NavKey::ArrowUp => {
                let next = (index + len - 1) % len;
                *self = Self::Open(next);
                Transition::Moved(next)
            }
            NavKey::Enter => {
                *self = Self::Closed;
                Transition::Confirm(index.min(len - 1))
            }
            NavKey::Escape => {
                *self = Self::Closed;
                Transition::Cancelled
            }
        }
    }
}
