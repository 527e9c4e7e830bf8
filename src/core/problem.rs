use ahash::{HashMap, HashMapExt};
use serde::{Deserialize, Serialize};

/// Discrete time unit. Untimed requests carry a deadline of `Time::MAX`.
pub type Time = u64;

/// Opaque location identifier, `0 .. RequestGraph::vertices()`.
pub type Vertex = usize;

/// A ride request: a directed edge serviceable inside `[release, deadline)`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Serialize, PartialEq)]
pub struct Request {
    pub origin: Vertex,
    pub destination: Vertex,
    pub release: Time,
    pub deadline: Time,
}

impl Request {
    /// Key used wherever a fixed total order on requests is needed:
    /// deadline first, then release, then the ordered vertex pair.
    #[must_use]
    pub const fn edf_key(&self) -> (Time, Time, Vertex, Vertex) {
        (self.deadline, self.release, self.origin, self.destination)
    }
}

impl std::fmt::Display for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.origin, self.destination)
    }
}

/// The immutable problem input: a vertex set and at most one request per
/// ordered vertex pair. Requests keep insertion order; the pair index only
/// backs lookups, never iteration.
#[derive(Clone, Debug, Deserialize, Eq, Serialize, PartialEq)]
#[serde(from = "(usize, Vec<Request>)", into = "(usize, Vec<Request>)")]
pub struct RequestGraph {
    vertices: usize,
    requests: Vec<Request>,
    index: HashMap<(Vertex, Vertex), usize>,
}

impl RequestGraph {
    /// Creates an empty graph over `vertices` locations.
    #[must_use]
    pub fn new(vertices: usize) -> Self {
        Self {
            vertices,
            requests: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Adds a request, returning whether it was stored. A request that can
    /// never be served (`deadline <= 1`, an empty window, a self-loop) or
    /// that mentions an unknown vertex is omitted, not an error. A second
    /// request on the same ordered pair replaces the first one's window.
    pub fn add_request(
        &mut self,
        origin: Vertex,
        destination: Vertex,
        release: Time,
        deadline: Time,
    ) -> bool {
        if origin == destination || origin >= self.vertices || destination >= self.vertices {
            return false;
        }
        if deadline <= release || deadline <= 1 {
            return false;
        }

        let request = Request {
            origin,
            destination,
            release,
            deadline,
        };

        match self.index.get(&(origin, destination)) {
            Some(&at) => self.requests[at] = request,
            None => {
                self.index.insert((origin, destination), self.requests.len());
                self.requests.push(request);
            }
        }

        true
    }

    /// Adds an untimed request: release 0, never expires.
    pub fn add_edge(&mut self, origin: Vertex, destination: Vertex) -> bool {
        self.add_request(origin, destination, 0, Time::MAX)
    }

    /// Returns the request on the given ordered pair, if any.
    #[must_use]
    pub fn get(&self, origin: Vertex, destination: Vertex) -> Option<&Request> {
        self.index
            .get(&(origin, destination))
            .map(|&at| &self.requests[at])
    }

    /// Returns the number of vertices.
    #[must_use]
    pub const fn vertices(&self) -> usize {
        self.vertices
    }

    /// Returns the stored requests in insertion order.
    #[must_use]
    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    /// Returns the number of stored requests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Returns whether the graph holds no requests.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Largest finite deadline in the graph, 0 if there is none. Instance
    /// files without an explicit time-limit line default to this.
    #[must_use]
    pub fn max_finite_deadline(&self) -> Time {
        self.requests
            .iter()
            .map(|request| request.deadline)
            .filter(|&deadline| deadline != Time::MAX)
            .max()
            .unwrap_or(0)
    }
}

impl From<(usize, Vec<Request>)> for RequestGraph {
    fn from((vertices, requests): (usize, Vec<Request>)) -> Self {
        let mut graph = Self::new(vertices);
        for request in requests {
            graph.add_request(
                request.origin,
                request.destination,
                request.release,
                request.deadline,
            );
        }
        graph
    }
}

impl From<RequestGraph> for (usize, Vec<Request>) {
    fn from(graph: RequestGraph) -> Self {
        (graph.vertices, graph.requests)
    }
}
