#![deny(missing_docs)]

//! # Runtime Boilerplate
//!
//! The static TypeScript support block emitted at the top of every generated
//! file: the response wrapper, authenticator composition, the dispatching
//! `apiRequest` function with its cancellation handle, and the query-string
//! serializer. The generated client methods compile against exactly these
//! declarations, so the text here is part of the generator's contract.

/// The shared runtime support block, emitted once per generated file.
pub const BOILERPLATE: &str = r#"
interface CancelablePromise<T> extends Promise<T> {
	'@@redux-saga/CANCEL_PROMISE': () => void;
}

function makeCancelablePromise<T>(promise: Promise<T>, onCancel: () => void): CancelablePromise<T> {
	const castedPromise = promise as CancelablePromise<T>;
	castedPromise['@@redux-saga/CANCEL_PROMISE'] = onCancel;
	return castedPromise;
}

export class FetchResponse<S extends number, R> {
	public status: S;
	public result: R;
	public url: Response['url'];
	public type: Response['type'];
	public headers: Response['headers'];
	public statusText: Response['statusText'];
	public redirected: Response['redirected'];
	public ok: S extends 200 ? true : S extends 201 ? true : S extends 204 ? true : false;
	public constructor(response: Response, status: S, result: R) {
		this.status = status;
		this.result = result;
		this.url = response.url;
		this.type = response.type;
		this.headers = response.headers;
		this.statusText = response.statusText;
		this.redirected = response.redirected;
		// eslint-disable-next-line @typescript-eslint/no-explicit-any
		this.ok = (status === 200 || status === 201 || status === 204) as any;
	}
	public expectSuccess(): S extends 200 ? R : S extends 201 ? R : S extends 204 ? R : never {
		if (this.ok) {
			// eslint-disable-next-line @typescript-eslint/no-explicit-any
			return this.result as any;
		}
		const stringifiedResponse = JSON.stringify(this.result, null, 2);
		throw new Error(`Response was not OK.\nResponse body:\n${stringifiedResponse}`);
	}
	public expect<E extends S>(code: E | E[]): S extends E ? R : never {
		if (Array.isArray(code) ? (code as number[]).includes(this.status) : this.status === code) {
			// eslint-disable-next-line @typescript-eslint/no-explicit-any
			return this.result as any;
		}
		const stringifiedResponse = JSON.stringify(this.result, null, 2);
		throw new Error(
			`Expected HTTP status code to be ${code}, but it was ${this.status}.\n` +
			`Response body:\n${stringifiedResponse}`
		);
	}
}

// eslint-disable-next-line @typescript-eslint/no-unused-vars, @typescript-eslint/no-explicit-any
function toJson(response: Response): Promise<any> {
	return response.json();
}
// eslint-disable-next-line @typescript-eslint/no-unused-vars
function toResponse(response: Response): Promise<Response> {
	return Promise.resolve(response);
}

export interface ResolvedSecurity {
	updateUrl(url: string): string;
	updateHeaders(headers: Record<string, string>): Record<string, string>;
}
export interface Security<N extends string, S extends string> extends ResolvedSecurity {
	readonly name: N;
	readonly scope: S[];
}
// eslint-disable-next-line @typescript-eslint/no-unused-vars
class HttpAuthentication<N extends string> implements Security<N, never> {
	public readonly name: N;
	public readonly scope: never[] = [];
	public readonly token: string;
	public readonly schema: string;
	public constructor(name: N, token: string, schema: string) {
		this.name = name;
		this.token = token;
		this.schema = schema;
	}
	public updateUrl(url: string): string {
		return url;
	}
	public updateHeaders(headers: Record<string, string>): Record<string, string> {
		return {
			...headers,
			'Authorization': `${this.schema} ${this.token}`,
		};
	}
}
// eslint-disable-next-line @typescript-eslint/no-unused-vars
class ApiKeyAuthentication<N extends string> implements Security<N, never> {
	public readonly name: N;
	public readonly scope: never[] = [];
	public readonly token: string;
	public readonly key: string;
	public readonly in: 'query' | 'header' | 'cookie';
	public constructor(name: N, inType: 'query' | 'header' | 'cookie', key: string, token: string) {
		this.name = name;
		this.token = token;
		this.in = inType;
		this.key = key;
	}
	public updateUrl(url: string): string {
		if (this.in === 'query') {
			const arg = `${encodeURIComponent(this.key)}=${encodeURIComponent(this.token)}`;
			if (url.includes('?')) {
				return `${url}&${arg}`;
			} else {
				return `${url}?${arg}`;
			}
		}
		return url;
	}
	public updateHeaders(headers: Record<string, string>): Record<string, string> {
		if (this.in === 'header') {
			return {
				...headers,
				[this.key]: this.token,
			};
		}
		return headers;
	}
}

const VoidSecurity: ResolvedSecurity = {
	updateUrl(url): string {
		return url;
	},
	updateHeaders(headers): Record<string, string> {
		return headers;
	},
};

// eslint-disable-next-line @typescript-eslint/no-unused-vars
function combinedSecurity<S extends Record<string, ResolvedSecurity>>(sec: S): ResolvedSecurity {
	const array = Object.values(sec);
	switch (array.length) {
		case 0:
			return VoidSecurity;
		case 1:
			return array[0];
		default: return {
			updateUrl(url): string {
				for (const security of array) {
					url = security.updateUrl(url);
				}
				return url;
			},
			updateHeaders(headers): Record<string, string> {
				for (const security of array) {
					headers = security.updateHeaders(headers);
				}
				return headers;
			},
		};
	}
}

type ObjectValues<O> = O[keyof O];
// eslint-disable-next-line @typescript-eslint/no-explicit-any
type Unpromisify<F extends (...args: any[]) => Promise<any>> = F extends (...args: []) => Promise<infer R> ? R : never;
// eslint-disable-next-line @typescript-eslint/no-explicit-any
type ResponseMapToReturnType<R extends {[key: number]: (...args: any[]) => Promise<any>}> =
	ObjectValues<{ [K in keyof R]: K extends number ? FetchResponse<K, Unpromisify<R[K]>> : never }>
// eslint-disable-next-line @typescript-eslint/no-explicit-any, @typescript-eslint/no-unused-vars
type JsonAny = any;

// eslint-disable-next-line @typescript-eslint/no-explicit-any
function apiRequest<R extends {[key: number]: (response: Response) => Promise<any>}>(
	request: Request,
	statusCodes: R,
): CancelablePromise<ResponseMapToReturnType<R>> {
	const controller = new AbortController();
	const newRequest = new Request(request, {
		signal: controller.signal,
		credentials: 'omit',
	});
	return makeCancelablePromise(fetch(newRequest).then((response): Promise<ResponseMapToReturnType<R>> => {
		const status = response.status;
		const parser = statusCodes[status];
		if (!parser) {
			throw new Error(`Undocumented HTTP status code: ${status}`);
		}
		return parser(response).then((decoded): ResponseMapToReturnType<R> => {
			const result = new FetchResponse(response, status, decoded);
			return result as ResponseMapToReturnType<R>;
		});
	}), (): void => controller.abort());
}

interface Options {
	cache?: Request['cache'];
	headers?: Record<string, string>;
}

// eslint-disable-next-line @typescript-eslint/no-unused-vars
function objectToQueryString(input: Record<string, string | number | boolean | null | undefined>): string {
	const entries = Object.entries(input).filter((entry): entry is [string, string | number | boolean] => entry[1] !== null && entry[1] !== undefined);
	if (entries.length === 0) {
		return '';
	}
	return `?${entries
		.map(([key, value]): string => `${encodeURIComponent(key)}=${encodeURIComponent(value.toString())}`).join('&')}`;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boilerplate_declares_runtime_support() {
        for needle in [
            "class FetchResponse<S extends number, R>",
            "function toJson(response: Response)",
            "function toResponse(response: Response)",
            "function combinedSecurity<S extends Record<string, ResolvedSecurity>>",
            "function apiRequest<R extends",
            "Undocumented HTTP status code",
            "function objectToQueryString(",
            "const VoidSecurity: ResolvedSecurity",
            "class HttpAuthentication<N extends string>",
            "class ApiKeyAuthentication<N extends string>",
        ] {
            assert!(BOILERPLATE.contains(needle), "missing: {}", needle);
        }
    }

    #[test]
    fn test_query_string_pairs_join_with_ampersand() {
        assert!(BOILERPLATE.contains(".join('&')"));
    }

    #[test]
    fn test_cancellation_handle_is_attached() {
        assert!(BOILERPLATE.contains("'@@redux-saga/CANCEL_PROMISE'"));
        assert!(BOILERPLATE.contains("controller.abort()"));
    }
}
