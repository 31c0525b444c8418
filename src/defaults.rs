use crate::error::DefaultCode;
use crate::platform::Platform;
use crate::{Nvm, State};
#[cfg(feature = "defmt")]
use defmt::{trace, warn};

impl<T: Platform> Nvm<T> {
    /// Erases the medium and writes the default of every slot of the layout.
    ///
    /// The steps run in order and the first failing one decides the returned code. Slots
    /// written before a failure keep their default, everything else is left erased.
    pub fn set_defaults(&mut self) -> DefaultCode {
        #[cfg(feature = "defmt")]
        trace!("set_defaults: {} slots", self.layout.slots().len());

        #[cfg(feature = "debug-logs")]
        println!("Nvm: set_defaults");

        if self.state != State::Started {
            return DefaultCode::FailMaxSize;
        }

        let max_size = match self.hal.max_size() {
            Ok(size) => size,
            Err(_) => {
                #[cfg(feature = "defmt")]
                warn!("set_defaults: medium size unknown");
                return DefaultCode::FailMaxSizeUnknown;
            }
        };

        let layout = self.layout;
        let usable = max_size.min(self.capacity);
        if layout.size() > usable {
            #[cfg(feature = "defmt")]
            warn!("set_defaults: {} bytes don't fit {}", layout.size(), usable);
            return DefaultCode::SizeTooBig;
        }

        // capacity was checked to fit u32 by init
        if self.hal.clear(0, usable as u32).is_err() {
            return DefaultCode::FailClear;
        }

        for slot in layout.slots() {
            if self.write_raw(slot.address(), slot.default()).is_err() {
                #[cfg(feature = "defmt")]
                warn!("set_defaults: writing @{:#06x} failed", slot.address());
                return DefaultCode::FailWrite;
            }
        }

        DefaultCode::Ok
    }
}
