use crate::{
    error::QheError,
    gate::{Gate, GateRecord},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Init,
    Clifford,
    T,
}

/// Maximal contiguous run of gates of one kind. A T layer holds at most one
/// T per wire and carries its 1-based T-layer index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layer {
    kind: LayerKind,
    t_layer: Option<usize>,
    gates: Vec<Gate>,
}

impl Layer {
    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn t_layer(&self) -> Option<usize> {
        self.t_layer
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    fn accepts(&self, gate: &Gate) -> bool {
        match (self.kind, gate) {
            (LayerKind::Init, g) => g.is_init(),
            (LayerKind::Clifford, g) => g.is_clifford(),
            (LayerKind::T, Gate::T(wire)) => !self.gates.contains(&Gate::T(*wire)),
            (LayerKind::T, _) => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayeredCircuit {
    num_wires: usize,
    layers: Vec<Layer>,
}

impl LayeredCircuit {
    /// Parses and layers `records` for a circuit of `num_wires` wires.
    pub fn classify(num_wires: usize, records: &[GateRecord]) -> Result<Self, QheError> {
        let gates: Vec<Gate> = records.iter().map(Gate::parse).collect::<Result<_, _>>()?;
        LayeredCircuit::from_gates(num_wires, gates)
    }

    pub fn from_gates<I: IntoIterator<Item = Gate>>(num_wires: usize, gates: I) -> Result<Self, QheError> {
        let mut layers: Vec<Layer> = Vec::new();
        let mut t_depth: usize = 0;
        let mut logical: bool = false;

        for gate in gates {
            if let Some(wire) = gate.wires().into_iter().find(|&w| w >= num_wires) {
                return Err(QheError::InvalidConfiguration(format!(
                    "gate {gate} uses wire {wire} of a {num_wires}-wire circuit"
                )));
            }
            if matches!(gate, Gate::Cnot { control, target } if control == target) {
                return Err(QheError::InvalidConfiguration(format!(
                    "gate {gate} has the same control and target"
                )));
            }
            if gate.is_init() && logical {
                return Err(QheError::InvalidConfiguration(format!(
                    "pad gate {gate} follows the logical circuit"
                )));
            }
            logical |= !gate.is_init();

            match layers.last_mut() {
                Some(layer) if layer.accepts(&gate) => layer.gates.push(gate),
                _ => {
                    let kind: LayerKind = if gate.is_init() {
                        LayerKind::Init
                    } else if gate.is_t() {
                        LayerKind::T
                    } else {
                        LayerKind::Clifford
                    };
                    let t_layer: Option<usize> = (kind == LayerKind::T).then(|| {
                        t_depth += 1;
                        t_depth
                    });
                    layers.push(Layer {
                        kind,
                        t_layer,
                        gates: vec![gate],
                    });
                }
            }
        }

        log::debug!(
            "layered {} gates on {} wires into {} layers (T-depth {})",
            layers.iter().map(Layer::len).sum::<usize>(),
            num_wires,
            layers.len(),
            t_depth
        );

        Ok(LayeredCircuit { num_wires, layers })
    }

    pub fn num_wires(&self) -> usize {
        self.num_wires
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Number of T layers.
    pub fn t_depth(&self) -> usize {
        self.layers.iter().filter(|layer| layer.kind == LayerKind::T).count()
    }

    pub fn num_gates(&self) -> usize {
        self.layers.iter().map(Layer::len).sum()
    }

    pub fn gates(&self) -> impl Iterator<Item = &Gate> {
        self.layers.iter().flat_map(|layer| layer.gates.iter())
    }
}
